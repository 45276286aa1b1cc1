use crate::types::{GeoTransform, MetaError, MetaResult};
use gdal::spatial_ref::SpatialRef;
use gdal::Dataset;
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::path::Path;
use std::ptr::null;

/// Read access to the raster properties that end up in the sidecar.
///
/// Band indices are 1-based as in GDAL; only band 1 is ever consulted.
pub trait RasterSource {
    /// (columns, rows)
    fn raster_size(&self) -> (usize, usize);

    fn geo_transform(&self) -> MetaResult<GeoTransform>;

    fn band_count(&self) -> MetaResult<usize>;

    /// Nodata value of band 1, `None` if the band defines none
    fn nodata(&self) -> MetaResult<Option<f64>>;

    /// numpy style name of the band 1 sample type (e.g. "uint8", "float32")
    fn sample_datatype(&self) -> MetaResult<String>;

    /// Authority code of the spatial reference, `None` if there is none
    fn epsg_code(&self) -> Option<String>;
}

/// Raster dataset opened through GDAL
pub struct GdalRaster {
    dataset: Dataset,
}

impl GdalRaster {
    pub fn open<P: AsRef<Path>>(path: P) -> MetaResult<Self> {
        log::debug!("Opening raster: {}", path.as_ref().display());
        let dataset = Dataset::open(path.as_ref())?;
        Ok(GdalRaster { dataset })
    }

    /// Create an in-memory warped VRT of this raster in the given EPSG reference.
    ///
    /// The view references this dataset, hence the borrow.
    pub fn warped_to_epsg(&self, epsg: u32) -> MetaResult<GeographicView<'_>> {
        log::debug!("Creating warped view in EPSG:{}", epsg);

        let dst_wkt = CString::new(SpatialRef::from_epsg(epsg)?.to_wkt()?)
            .map_err(|e| MetaError::InvalidRaster(format!("Invalid WKT for EPSG:{}: {}", epsg, e)))?;

        let c_warped = unsafe {
            gdal_sys::GDALAutoCreateWarpedVRT(
                self.dataset.c_dataset(),
                null(),
                dst_wkt.as_ptr(),
                gdal_sys::GDALResampleAlg::GRA_NearestNeighbour,
                0.125,
                null(),
            )
        };

        if c_warped.is_null() {
            return Err(MetaError::InvalidRaster(format!(
                "Failed to warp raster to EPSG:{}: {}",
                epsg,
                last_gdal_error_msg()
            )));
        }

        let dataset = unsafe { Dataset::from_c_dataset(c_warped) };
        Ok(GeographicView {
            raster: GdalRaster { dataset },
            _source: PhantomData,
        })
    }

    /// Read a single pixel of band 1 to make sure the band is readable
    pub fn read_sample(&self) -> MetaResult<f64> {
        let band = self.dataset.rasterband(1)?;
        let buffer = band.read_as::<f64>((0, 0), (1, 1), (1, 1), None)?;
        buffer.data.first().copied().ok_or_else(|| {
            MetaError::InvalidRaster("Empty sample read from band 1".to_string())
        })
    }
}

impl RasterSource for GdalRaster {
    fn raster_size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    fn geo_transform(&self) -> MetaResult<GeoTransform> {
        Ok(GeoTransform::from(self.dataset.geo_transform()?))
    }

    fn band_count(&self) -> MetaResult<usize> {
        let count = self.dataset.raster_count();
        usize::try_from(count)
            .map_err(|_| MetaError::InvalidRaster(format!("Invalid band count: {}", count)))
    }

    fn nodata(&self) -> MetaResult<Option<f64>> {
        Ok(self.dataset.rasterband(1)?.no_data_value())
    }

    fn sample_datatype(&self) -> MetaResult<String> {
        let gdal_name = self.dataset.rasterband(1)?.band_type().name();
        Ok(numpy_type_name(&gdal_name))
    }

    fn epsg_code(&self) -> Option<String> {
        let srs = self.dataset.spatial_ref().ok()?;
        srs.auth_code().ok().map(|code| code.to_string())
    }
}

/// Warped virtual view of a [`GdalRaster`]
pub struct GeographicView<'a> {
    raster: GdalRaster,
    _source: PhantomData<&'a GdalRaster>,
}

impl RasterSource for GeographicView<'_> {
    fn raster_size(&self) -> (usize, usize) {
        self.raster.raster_size()
    }

    fn geo_transform(&self) -> MetaResult<GeoTransform> {
        self.raster.geo_transform()
    }

    fn band_count(&self) -> MetaResult<usize> {
        self.raster.band_count()
    }

    fn nodata(&self) -> MetaResult<Option<f64>> {
        self.raster.nodata()
    }

    fn sample_datatype(&self) -> MetaResult<String> {
        self.raster.sample_datatype()
    }

    fn epsg_code(&self) -> Option<String> {
        self.raster.epsg_code()
    }
}

/// Map GDAL data type names onto the numpy dtype names used in the sidecar.
/// Unknown names are passed through lowercased.
pub fn numpy_type_name(gdal_name: &str) -> String {
    match gdal_name {
        "Byte" => "uint8",
        "Int8" => "int8",
        "UInt16" => "uint16",
        "Int16" => "int16",
        "UInt32" => "uint32",
        "Int32" => "int32",
        "UInt64" => "uint64",
        "Int64" => "int64",
        "Float16" => "float16",
        "Float32" => "float32",
        "Float64" => "float64",
        "CInt16" | "CFloat32" => "complex64",
        "CInt32" | "CFloat64" => "complex128",
        other => return other.to_lowercase(),
    }
    .to_string()
}

fn last_gdal_error_msg() -> String {
    let msg = unsafe { gdal_sys::CPLGetLastErrorMsg() };
    if msg.is_null() {
        return "unknown error".to_string();
    }
    let cstr = unsafe { CStr::from_ptr(msg) };
    String::from_utf8_lossy(cstr.to_bytes()).to_string()
}
