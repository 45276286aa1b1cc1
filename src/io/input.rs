use crate::types::{MetaError, MetaResult};
use std::path::{Path, PathBuf};

/// Extension of GDAL virtual raster descriptions
pub const VRT_EXTENSION: &str = "vrt";

/// Path of the virtual raster that would shadow `path`
pub fn vrt_sibling<P: AsRef<Path>>(path: P) -> PathBuf {
    path.as_ref().with_extension(VRT_EXTENSION)
}

/// Resolve the working input for a payload path.
///
/// A previously built `.vrt` with the same stem takes precedence over the
/// payload itself since it may already encode mosaicking or warping.
pub fn resolve_input<P: AsRef<Path>>(payload: P) -> MetaResult<PathBuf> {
    let payload = payload.as_ref();
    let vrt = vrt_sibling(payload);

    if vrt.is_file() {
        log::info!("VRT file found");
        log::info!("Input file is : {}", vrt.display());
        return Ok(vrt);
    }

    if payload.is_file() {
        log::info!("Input file is : {}", payload.display());
        return Ok(payload.to_path_buf());
    }

    log::debug!("Neither {} nor {} exist", vrt.display(), payload.display());
    Err(MetaError::InputMissing)
}

/// `<input without extension>/<file_name>`
pub fn output_path<P: AsRef<Path>>(input: P, file_name: &str) -> PathBuf {
    input.as_ref().with_extension("").join(file_name)
}
