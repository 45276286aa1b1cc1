//! Core metadata computation modules

pub mod extent;
pub mod zone;
pub mod metadata;

// Re-export main functions
pub use extent::compute_extent;
pub use zone::epsg_to_utm_zone;
pub use metadata::{assemble_metadata, extract_metadata, run, time_service_for};
