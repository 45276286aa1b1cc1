use gdal::spatial_ref::SpatialRef;
use gdal::DriverManager;
use rastermeta::io::{resolve_input, GdalRaster, RasterSource};
use rastermeta::{extract_metadata, run, ExtractorConfig, MetaError, Offline, TimeSource};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn offline_config() -> ExtractorConfig {
    ExtractorConfig {
        offline: true,
        ..Default::default()
    }
}

/// 20x10 Float32 raster in EPSG:4326 covering lon 10..12, lat 49..50
fn create_geographic_tiff(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").expect("GTiff driver");
    let mut ds = driver
        .create_with_band_type::<f32, _>(&path, 20, 10, 1)
        .expect("Failed to create test raster");
    ds.set_geo_transform(&[10.0, 0.1, 0.0, 50.0, 0.0, -0.1]).unwrap();
    ds.set_spatial_ref(&SpatialRef::from_epsg(4326).unwrap()).unwrap();

    let mut band = ds.rasterband(1).unwrap();
    band.set_no_data_value(Some(-9999.0)).unwrap();
    path
}

/// 100x100 Byte raster in UTM zone 32N, 3 bands, no nodata
fn create_utm_tiff(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").expect("GTiff driver");
    let mut ds = driver
        .create_with_band_type::<u8, _>(&path, 100, 100, 3)
        .expect("Failed to create test raster");
    ds.set_geo_transform(&[500000.0, 30.0, 0.0, 5000000.0, 0.0, -30.0]).unwrap();
    ds.set_spatial_ref(&SpatialRef::from_epsg(32632).unwrap()).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("Failed to read metadata");
    serde_json::from_str(&content).expect("Invalid JSON")
}

#[test]
fn test_geographic_raster_metadata() {
    let dir = TempDir::new().unwrap();
    let tif = create_geographic_tiff(dir.path(), "scene.tif");

    let output = run(&tif, &offline_config()).expect("Extraction failed");
    assert_eq!(output, dir.path().join("scene").join("metadata.json"));

    let json = read_json(&output);
    assert_eq!(json.as_object().unwrap().len(), 13);
    assert_eq!(json["numband"], 1);
    assert_eq!(json["epsgcode"], "4326");
    assert_eq!(json["size"], serde_json::json!([20, 10]));
    assert_eq!(json["nodata"].as_f64(), Some(-9999.0));
    assert_eq!(json["datatype"], "float32");
    assert_eq!(json["file"], "scene.tif");
    assert_eq!(json["timesource"], "local");
    assert_eq!(json["originx"].as_f64(), Some(10.0));
    assert_eq!(json["originy"].as_f64(), Some(50.0));
    assert_eq!(json["pixelwidth"].as_f64(), Some(0.1));
    assert_eq!(json["pixelheight"].as_f64(), Some(-0.1));

    let bbox: Vec<f64> = json["bbox"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert_eq!(bbox.len(), 4);
    let expected = [10.0, 49.0, 12.0, 50.0];
    for (actual, expected) in bbox.iter().zip(expected.iter()) {
        assert!((actual - expected).abs() < 1e-3, "bbox {:?} != {:?}", bbox, expected);
    }
}

#[test]
fn test_projected_raster_bbox_is_geographic() {
    let dir = TempDir::new().unwrap();
    let tif = create_utm_tiff(dir.path(), "utm.tif");

    let metadata = extract_metadata(&tif, &offline_config(), &Offline).expect("Extraction failed");

    assert_eq!(metadata.epsgcode.as_deref(), Some("32632"));
    assert_eq!(metadata.numband, 3);
    assert_eq!(metadata.size, [100, 100]);
    assert_eq!(metadata.originx, 500000.0);
    assert_eq!(metadata.pixelheight, -30.0);
    assert_eq!(metadata.nodata, None);
    assert_eq!(metadata.datatype, "uint8");
    assert_eq!(metadata.timesource, TimeSource::Local);

    // central meridian of zone 32 is 9°E, northing 5000 km is about 45.1°N
    let [min_lon, min_lat, max_lon, max_lat] = metadata.bbox;
    assert!(min_lon <= max_lon && min_lat <= max_lat);
    assert!(min_lon > 8.9 && max_lon < 9.2, "lon range {} {}", min_lon, max_lon);
    assert!(min_lat > 45.0 && max_lat < 45.2, "lat range {} {}", min_lat, max_lat);
}

#[test]
fn test_nodata_serialized_as_null() {
    let dir = TempDir::new().unwrap();
    let tif = create_utm_tiff(dir.path(), "plain.tif");

    let output = run(&tif, &offline_config()).unwrap();
    let json = read_json(&output);
    assert!(json["nodata"].is_null());
}

#[test]
fn test_vrt_sibling_is_preferred() {
    let dir = TempDir::new().unwrap();
    let tif = create_geographic_tiff(dir.path(), "mosaic.tif");
    let vrt = dir.path().join("mosaic.vrt");

    let vrt_xml = r#"<VRTDataset rasterXSize="20" rasterYSize="10">
  <SRS>EPSG:4326</SRS>
  <GeoTransform>10.0, 0.1, 0.0, 50.0, 0.0, -0.1</GeoTransform>
  <VRTRasterBand dataType="Float32" band="1">
    <NoDataValue>-9999</NoDataValue>
    <SimpleSource>
      <SourceFilename relativeToVRT="1">mosaic.tif</SourceFilename>
      <SourceBand>1</SourceBand>
    </SimpleSource>
  </VRTRasterBand>
</VRTDataset>
"#;
    std::fs::write(&vrt, vrt_xml).unwrap();

    assert_eq!(resolve_input(&tif).unwrap(), vrt);

    let output = run(&tif, &offline_config()).unwrap();
    assert_eq!(output, dir.path().join("mosaic").join("metadata.json"));

    let json = read_json(&output);
    assert_eq!(json["file"], "mosaic.vrt");
    assert_eq!(json["size"], serde_json::json!([20, 10]));
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nothing.tif");

    let result = run(&missing, &offline_config());
    assert!(matches!(result, Err(MetaError::InputMissing)));
    assert!(!dir.path().join("nothing").exists());
}

#[test]
fn test_raster_without_srs_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nosrs.tif");
    {
        let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
        let mut ds = driver.create_with_band_type::<u8, _>(&path, 4, 4, 1).unwrap();
        ds.set_geo_transform(&[0.0, 1.0, 0.0, 4.0, 0.0, -1.0]).unwrap();
    }

    let result = run(&path, &offline_config());
    assert!(result.is_err());
    assert!(!dir.path().join("nosrs").join("metadata.json").exists());
}

#[test]
fn test_gdal_raster_source() {
    let dir = TempDir::new().unwrap();
    let tif = create_geographic_tiff(dir.path(), "source.tif");

    let raster = GdalRaster::open(&tif).unwrap();
    assert_eq!(raster.raster_size(), (20, 10));
    assert_eq!(raster.band_count().unwrap(), 1);
    assert_eq!(raster.nodata().unwrap(), Some(-9999.0));
    assert_eq!(raster.sample_datatype().unwrap(), "float32");
    assert_eq!(raster.epsg_code().as_deref(), Some("4326"));
    assert!(raster.read_sample().is_ok());

    let geographic = raster.warped_to_epsg(4326).unwrap();
    let (columns, rows) = geographic.raster_size();
    assert!(columns > 0 && rows > 0);
    assert_eq!(geographic.epsg_code().as_deref(), Some("4326"));
}
