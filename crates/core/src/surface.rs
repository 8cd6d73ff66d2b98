//! The drawable target the animation renders into.
//!
//! Implementations live outside the core: a CPU raster in `flowfield-raster`,
//! a browser canvas in `flowfield-wasm`. The trait mirrors the subset of a 2D
//! canvas API the effect needs.

use crate::color::Srgb;
use serde::{Deserialize, Serialize};

/// Stroke color and line width, fixed when a surface is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Srgb,
    pub line_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Srgb::WHITE,
            line_width: 1.0,
        }
    }
}

/// A 2D drawing target with path-based stroking.
///
/// Path semantics follow the HTML canvas: `begin_path` discards the current
/// path, `move_to` starts a new subpath, `line_to` extends it (or starts one
/// if there is none), and `stroke` draws every subpath of the current path
/// with the surface's [`StrokeStyle`].
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Resets the rectangle to the background.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn stroke(&mut self);
}
