//! I/O modules for resolving inputs, reading rasters, querying time and writing sidecars

pub mod input;
pub mod raster;
pub mod ntp;
pub mod writer;

pub use input::{resolve_input, output_path, vrt_sibling};
pub use raster::{GdalRaster, RasterSource, numpy_type_name};
pub use ntp::{SntpClient, Offline, TimeService, NtpError, ResolvedTime, resolve_timestamp};
pub use writer::write_metadata;
