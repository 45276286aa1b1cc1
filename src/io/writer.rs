use crate::types::{MetaResult, RasterMetadata};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const JSON_INDENT: &[u8] = b"    ";

/// Serialize metadata as 4-space indented JSON.
///
/// Non-ASCII characters are written as UTF-8, not escaped.
pub fn to_json_string(metadata: &RasterMetadata) -> MetaResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    metadata.serialize(&mut ser)?;
    buf.push(b'\n');

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the sidecar, creating the output directory if needed
pub fn write_metadata<P: AsRef<Path>>(metadata: &RasterMetadata, path: P) -> MetaResult<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            log::debug!("Creating output directory: {}", dir.display());
            std::fs::create_dir_all(dir)?;
        }
    }

    let json = to_json_string(metadata)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;

    log::debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}
