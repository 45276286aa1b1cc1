//! rastermeta: georeferenced raster metadata extraction
//!
//! Reads a single raster through GDAL, derives its geographic bounding box,
//! pixel geometry, spatial reference and band information, stamps the result
//! with a network (or local) UTC time and writes it as a JSON sidecar.

pub mod types;
pub mod config;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{
    BoundingBox, GeoTransform, MetaError, MetaResult, RasterMetadata, TimeSource,
};
pub use config::ExtractorConfig;

pub use io::{GdalRaster, RasterSource, SntpClient, Offline, TimeService};
pub use crate::core::{compute_extent, epsg_to_utm_zone, extract_metadata, run};
