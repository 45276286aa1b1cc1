/// UTM zone number encoded in the last two digits of an EPSG code
/// (e.g. 32632 -> 32, 32719 -> 19).
///
/// Not used for the bounding box, which is always derived from a geographic
/// view of the raster.
pub fn epsg_to_utm_zone(epsg_code: u32) -> Option<u32> {
    if epsg_code < 10 {
        return None;
    }
    let units = epsg_code % 10;
    let tens = (epsg_code / 10) % 10;
    Some(tens * 10 + units)
}
