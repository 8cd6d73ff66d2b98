//! Pixel coverage of a straight segment.
//!
//! Uses a DDA walk: the segment is sampled at `ceil(max(|dx|, |dy|))` evenly
//! spaced steps and each sample maps to the pixel whose unit square contains
//! it, so consecutive pixels are always 8-connected.

/// Pixels touched by the segment from `a` to `b`, endpoints included.
///
/// Coordinates may be negative or beyond any canvas; clipping is the
/// caller's job. A zero-length segment yields nothing, matching how a
/// canvas strokes a degenerate line with butt caps.
pub fn segment_pixels(a: (f64, f64), b: (f64, f64)) -> impl Iterator<Item = (i64, i64)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let span = dx.abs().max(dy.abs());
    let steps = if dx.is_finite() && dy.is_finite() && span > 0.0 {
        span.ceil() as usize
    } else {
        0
    };
    let count = if steps == 0 { 0 } else { steps + 1 };
    (0..count).map(move |i| {
        let t = i as f64 / steps as f64;
        let x = a.0 + dx * t;
        let y = a.1 + dy * t;
        (x.floor() as i64, y.floor() as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(a: (f64, f64), b: (f64, f64)) -> Vec<(i64, i64)> {
        segment_pixels(a, b).collect()
    }

    #[test]
    fn horizontal_segment_covers_each_column() {
        assert_eq!(
            collect((1.0, 2.0), (4.0, 2.0)),
            vec![(1, 2), (2, 2), (3, 2), (4, 2)]
        );
    }

    #[test]
    fn vertical_segment_covers_each_row() {
        assert_eq!(collect((0.5, 0.5), (0.5, 2.5)), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn diagonal_segment_is_connected() {
        let px = collect((0.0, 0.0), (5.0, 3.0));
        assert_eq!(px.first(), Some(&(0, 0)));
        assert_eq!(px.last(), Some(&(5, 3)));
        for w in px.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1, "gap between {a:?} and {b:?}");
        }
    }

    #[test]
    fn zero_length_segment_is_empty() {
        assert!(collect((3.0, 3.0), (3.0, 3.0)).is_empty());
    }

    #[test]
    fn non_finite_segment_is_empty() {
        assert!(collect((0.0, 0.0), (f64::INFINITY, 1.0)).is_empty());
        assert!(collect((0.0, f64::NAN), (1.0, 1.0)).is_empty());
    }

    #[test]
    fn negative_coordinates_floor_downward() {
        assert_eq!(collect((-1.5, 0.0), (-0.5, 0.0)), vec![(-2, 0), (-1, 0)]);
    }
}
