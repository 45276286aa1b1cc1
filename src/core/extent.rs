use crate::types::{BoundingBox, GeoTransform, MetaError, MetaResult};

/// Compute the extent of an axis-aligned raster from its geotransform.
///
/// Returns [min_x, min_y, max_x, max_y] in the units of the geotransform,
/// i.e. lon/lat when the raster is in a geographic reference. Rotated rasters
/// and a zero pixel height are rejected.
pub fn compute_extent(gt: &GeoTransform, columns: usize, rows: usize) -> MetaResult<BoundingBox> {
    if gt.rotation_x != 0.0 || gt.rotation_y != 0.0 {
        return Err(MetaError::InvalidGeoTransform(format!(
            "rotated rasters are not supported (rotation terms {}, {})",
            gt.rotation_x, gt.rotation_y
        )));
    }

    let min_x = gt.top_left_x;
    let max_x = gt.top_left_x + columns as f64 * gt.pixel_width;
    let max_y = gt.top_left_y;

    let min_y = if gt.pixel_height < 0.0 {
        gt.top_left_y + rows as f64 * gt.pixel_height
    } else if gt.pixel_height > 0.0 {
        gt.top_left_y - rows as f64 * gt.pixel_height
    } else {
        return Err(MetaError::InvalidGeoTransform(
            "pixel height is zero".to_string(),
        ));
    };

    let bbox = BoundingBox { min_x, min_y, max_x, max_y };
    log::debug!("Computed extent: {:?}", bbox);
    Ok(bbox)
}
