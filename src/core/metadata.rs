use crate::config::ExtractorConfig;
use crate::core::extent::compute_extent;
use crate::io::input::{output_path, resolve_input};
use crate::io::ntp::{resolve_timestamp, Offline, ResolvedTime, SntpClient, TimeService};
use crate::io::raster::{GdalRaster, RasterSource};
use crate::io::writer::write_metadata;
use crate::types::{MetaError, MetaResult, RasterMetadata};
use std::path::{Path, PathBuf};

/// Build the sidecar record from a raster and its geographic view.
///
/// Everything except the bounding box is read from `source`; the bounding box
/// comes from `geographic`, which must already be in a lon/lat reference.
pub fn assemble_metadata(
    source: &dyn RasterSource,
    geographic: &dyn RasterSource,
    file_name: &str,
    time: &ResolvedTime,
) -> MetaResult<RasterMetadata> {
    let (columns, rows) = source.raster_size();
    if columns == 0 || rows == 0 {
        return Err(MetaError::InvalidRaster(format!(
            "raster has no pixels ({}x{})", columns, rows
        )));
    }

    let numband = source.band_count()?;
    if numband == 0 {
        return Err(MetaError::InvalidRaster("raster has no bands".to_string()));
    }

    let geo_transform = source.geo_transform()?;
    log::debug!("Source size: {}x{}, geotransform: {:?}", columns, rows, geo_transform);

    let (geo_columns, geo_rows) = geographic.raster_size();
    let bbox = compute_extent(&geographic.geo_transform()?, geo_columns, geo_rows)?;
    if !bbox.is_ordered() {
        return Err(MetaError::InvalidRaster(format!(
            "geographic extent is not ordered: {:?}", bbox
        )));
    }

    Ok(RasterMetadata {
        bbox: bbox.to_array(),
        numband,
        epsgcode: source.epsg_code(),
        originx: geo_transform.top_left_x,
        originy: geo_transform.top_left_y,
        pixelwidth: geo_transform.pixel_width,
        pixelheight: geo_transform.pixel_height,
        size: [columns, rows],
        nodata: source.nodata()?,
        datatype: source.sample_datatype()?,
        file: file_name.to_string(),
        time: time.formatted(),
        timesource: time.source,
    })
}

/// Time service selected by the configuration
pub fn time_service_for(config: &ExtractorConfig) -> Box<dyn TimeService> {
    if config.offline {
        Box::new(Offline)
    } else {
        Box::new(SntpClient::new(&config.ntp_server, config.ntp_port, config.ntp_timeout))
    }
}

/// Open `input`, warp it to the configured geographic reference and read its metadata
pub fn extract_metadata<P: AsRef<Path>>(
    input: P,
    config: &ExtractorConfig,
    time_service: &dyn TimeService,
) -> MetaResult<RasterMetadata> {
    let input = input.as_ref();
    log::info!("Extracting metadata from: {}", input.display());

    let raster = GdalRaster::open(input)?;
    let geographic = raster.warped_to_epsg(config.geographic_epsg)?;

    let sample = raster.read_sample()?;
    log::debug!("Band 1 sample at (0,0): {}", sample);

    let time = resolve_timestamp(time_service);
    log::debug!("Timestamp {} from {}", time.formatted(), time.source);

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    assemble_metadata(&raster, &geographic, &file_name, &time)
}

/// Resolve the payload, extract its metadata and write the sidecar.
///
/// Returns the path of the written file. Nothing is written if any step fails.
pub fn run<P: AsRef<Path>>(payload: P, config: &ExtractorConfig) -> MetaResult<PathBuf> {
    let input = resolve_input(payload)?;
    let output = output_path(&input, &config.output_name);
    log::info!("Output file is : {}", output.display());

    let time_service = time_service_for(config);
    let metadata = extract_metadata(&input, config, time_service.as_ref())?;

    write_metadata(&metadata, &output)?;
    log::info!("Metadata written for {} ({} bands, {}x{})",
               metadata.file, metadata.numband, metadata.size[0], metadata.size[1]);

    Ok(output)
}
