//! PNG output of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so WASM builds do not pull in the
//! `image` crate.

use crate::Raster;
use flowfield_core::{FlowError, Surface};
use std::path::{Path, PathBuf};

/// Writes the raster's current pixels as a PNG.
///
/// Returns `FlowError::InvalidDimensions` if a dimension overflows `u32`,
/// or `FlowError::Io` on encode/write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FlowError> {
    let w = u32::try_from(raster.width()).map_err(|_| FlowError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FlowError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.pixels().to_vec())
        .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FlowError::Io(e.to_string()))?;
    log::debug!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}

/// Path of frame `index` inside `dir`: `frame_00042.png`.
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}
