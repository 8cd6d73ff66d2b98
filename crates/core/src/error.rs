//! Error types for the flow-field core.

use thiserror::Error;

/// Errors produced while building or driving an [`Effect`](crate::Effect).
#[derive(Debug, Error)]
pub enum FlowError {
    /// Canvas width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Cell size was zero, negative or not finite.
    #[error("invalid cell size {0}: must be a positive finite number of pixels")]
    InvalidCellSize(f64),

    /// The canvas is smaller than a single grid cell, so the flow field has no cells.
    #[error("empty flow field: a {width}x{height} canvas holds no {cell_size}px cell")]
    EmptyGrid {
        width: usize,
        height: usize,
        cell_size: f64,
    },

    /// The particle count was zero or above [`MAX_PARTICLES`](crate::config::MAX_PARTICLES).
    #[error(
        "invalid particle count {0}: must be between 1 and {max}",
        max = crate::config::MAX_PARTICLES
    )]
    InvalidParticleCount(usize),

    /// The grid would hold more than [`MAX_FIELD_CELLS`](crate::field::MAX_FIELD_CELLS) cells.
    #[error(
        "flow field too large: {cols}x{rows} cells exceeds {max}",
        max = crate::field::MAX_FIELD_CELLS
    )]
    FieldTooLarge { rows: usize, cols: usize },

    /// A numeric parameter was NaN, infinite or outside its range.
    #[error("invalid parameter '{name}': {value} is out of range")]
    InvalidParameter { name: String, value: f64 },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The host frame scheduler refused a request.
    #[error("frame scheduler error: {0}")]
    Scheduler(String),

    /// File or encoding failure while writing output.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = format!("{}", FlowError::InvalidDimensions);
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_cell_size_includes_value() {
        let msg = format!("{}", FlowError::InvalidCellSize(-2.5));
        assert!(msg.contains("-2.5"), "missing value in: {msg}");
    }

    #[test]
    fn empty_grid_includes_geometry() {
        let err = FlowError::EmptyGrid {
            width: 3,
            height: 4,
            cell_size: 10.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("3x4"), "missing canvas size in: {msg}");
        assert!(msg.contains("10"), "missing cell size in: {msg}");
    }

    #[test]
    fn invalid_parameter_includes_name() {
        let err = FlowError::InvalidParameter {
            name: "zoom".into(),
            value: f64::NAN,
        };
        let msg = format!("{err}");
        assert!(msg.contains("zoom"), "missing name in: {msg}");
        assert!(msg.contains("NaN"), "missing value in: {msg}");
    }

    #[test]
    fn particle_count_includes_value_and_cap() {
        let msg = FlowError::InvalidParticleCount(9_000).to_string();
        assert!(msg.contains("9000"), "missing value in: {msg}");
        assert!(msg.contains("5000"), "missing cap in: {msg}");
    }

    #[test]
    fn field_too_large_includes_grid() {
        let msg = FlowError::FieldTooLarge {
            rows: 6_000,
            cols: 8_000,
        }
        .to_string();
        assert!(msg.contains("8000x6000"), "missing grid in: {msg}");
    }

    #[test]
    fn scheduler_and_io_include_message() {
        assert!(FlowError::Scheduler("no window".into())
            .to_string()
            .contains("no window"));
        assert!(FlowError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
    }

    #[test]
    fn flow_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlowError>();
    }

    #[test]
    fn flow_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FlowError>();
    }
}
