use serde::{Deserialize, Serialize};

/// Time source provenance for the extraction timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// Timestamp obtained from a network time server
    Internet,
    /// Timestamp taken from the local system clock
    Local,
}

impl std::fmt::Display for TimeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeSource::Internet => write!(f, "internet"),
            TimeSource::Local => write!(f, "local"),
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Ordered as [min_x, min_y, max_x, max_y]
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    pub fn is_ordered(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }
}

/// Geospatial transformation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub top_left_x: f64,
    pub pixel_width: f64,
    pub rotation_x: f64,
    pub top_left_y: f64,
    pub rotation_y: f64,
    pub pixel_height: f64,
}

impl From<[f64; 6]> for GeoTransform {
    fn from(gt: [f64; 6]) -> Self {
        GeoTransform {
            top_left_x: gt[0],
            pixel_width: gt[1],
            rotation_x: gt[2],
            top_left_y: gt[3],
            rotation_y: gt[4],
            pixel_height: gt[5],
        }
    }
}

/// Metadata record written to the JSON sidecar.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterMetadata {
    /// Geographic bounding box [min_lon, min_lat, max_lon, max_lat]
    pub bbox: [f64; 4],
    pub numband: usize,
    /// Authority code of the source (non-reprojected) dataset
    pub epsgcode: Option<String>,
    pub originx: f64,
    pub originy: f64,
    pub pixelwidth: f64,
    pub pixelheight: f64,
    /// [columns, rows]
    pub size: [usize; 2],
    /// Non-finite values are written as the strings "NaN", "Infinity", "-Infinity"
    #[serde(with = "nodata_value")]
    pub nodata: Option<f64>,
    pub datatype: String,
    pub file: String,
    pub time: String,
    pub timesource: TimeSource,
}

/// JSON representation of the nodata value.
///
/// JSON numbers cannot hold NaN or infinities, and serde_json would turn them
/// into `null`, which is reserved for "no nodata defined". Those values are
/// written as the tokens Python's json module uses, quoted.
mod nodata_value {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            None => serializer.serialize_none(),
            Some(v) if v.is_nan() => serializer.serialize_str("NaN"),
            Some(v) if *v == f64::INFINITY => serializer.serialize_str("Infinity"),
            Some(v) if *v == f64::NEG_INFINITY => serializer.serialize_str("-Infinity"),
            Some(v) => serializer.serialize_f64(*v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Number(v)) => Ok(Some(v)),
            Some(Repr::Text(text)) => match text.as_str() {
                "NaN" => Ok(Some(f64::NAN)),
                "Infinity" => Ok(Some(f64::INFINITY)),
                "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
                other => Err(D::Error::custom(format!("invalid nodata value: {}", other))),
            },
        }
    }
}

/// Error types for metadata extraction
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("No input file exist")]
    InputMissing,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Invalid geotransform: {0}")]
    InvalidGeoTransform(String),

    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for metadata operations
pub type MetaResult<T> = Result<T, MetaError>;
