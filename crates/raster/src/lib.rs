#![deny(unsafe_code)]
//! CPU drawing surface for the flow-field animation.
//!
//! [`Raster`] implements [`Surface`] over an RGBA8 buffer so an
//! [`Effect`](flowfield_core::Effect) can run headless: the CLI renders into
//! it and writes PNG snapshots through [`snapshot`] (feature `png`, on by
//! default).

pub mod line;

#[cfg(feature = "png")]
pub mod snapshot;

use flowfield_core::{FlowError, Srgb, StrokeStyle, Surface};

/// RGBA8 pixel buffer with canvas-style path stroking.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    stroke: StrokeStyle,
    background: Srgb,
    pixels: Vec<u8>,
    path: Vec<Vec<(f64, f64)>>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `FlowError::InvalidDimensions` if either dimension is zero or
    /// the buffer size overflows, and `FlowError::InvalidParameter` unless the
    /// stroke's `line_width` is positive, finite and no wider than the larger
    /// dimension.
    pub fn new(
        width: usize,
        height: usize,
        stroke: StrokeStyle,
        background: Srgb,
    ) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FlowError::InvalidDimensions)?;
        let line_width = stroke.line_width;
        if !line_width.is_finite() || line_width <= 0.0 || line_width > width.max(height) as f64 {
            return Err(FlowError::InvalidParameter {
                name: "line_width".to_string(),
                value: line_width,
            });
        }
        let mut pixels = vec![0; len];
        let bg = background.to_rgba8();
        pixels.chunks_exact_mut(4).for_each(|px| px.copy_from_slice(&bg));
        Ok(Self {
            width,
            height,
            stroke,
            background,
            pixels,
            path: Vec::new(),
        })
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Number of pixels that differ from the background.
    pub fn painted_pixels(&self) -> usize {
        let bg = self.background.to_rgba8();
        self.pixels
            .chunks_exact(4)
            .filter(|px| *px != bg.as_slice())
            .count()
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    fn fill(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    /// Stamps a square brush `line_width` pixels across centred on `(x, y)`,
    /// clipped to the raster.
    fn stamp(&mut self, x: i64, y: i64, color: [u8; 4]) {
        let reach = ((self.stroke.line_width.max(1.0) - 1.0) / 2.0).round() as i64;
        let (w, h) = (self.width as i64, self.height as i64);
        let (x0, x1) = (x.saturating_sub(reach).max(0), x.saturating_add(reach).min(w - 1));
        let (y0, y1) = (y.saturating_sub(reach).max(0), y.saturating_add(reach).min(h - 1));
        for by in y0..=y1 {
            for bx in x0..=x1 {
                self.fill(bx, by, color);
            }
        }
    }
}

impl Surface for Raster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let span = |start: f64, len: f64, max: usize| -> (usize, usize) {
            let lo = start.floor().clamp(0.0, max as f64) as usize;
            let hi = (start + len).ceil().clamp(0.0, max as f64) as usize;
            (lo, hi.max(lo))
        };
        let (x0, x1) = span(x, w, self.width);
        let (y0, y1) = span(y, h, self.height);
        let bg = self.background.to_rgba8();
        for row in y0..y1 {
            let start = (row * self.width + x0) * 4;
            let end = (row * self.width + x1) * 4;
            self.pixels[start..end]
                .chunks_exact_mut(4)
                .for_each(|px| px.copy_from_slice(&bg));
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self) {
        let color = self.stroke.color.to_rgba8();
        let path = std::mem::take(&mut self.path);
        for subpath in &path {
            for seg in subpath.windows(2) {
                for (px, py) in line::segment_pixels(seg[0], seg[1]) {
                    self.stamp(px, py, color);
                }
            }
        }
        self.path = path;
    }
}
