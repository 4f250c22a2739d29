// crates/geodash-core/src/geo/loader.rs

//! # Geography Loader
//!
//! Handles the physical layer (I/O, decompression) and delegates to the
//! normaliser. A failure here is fatal for the session: the shell turns it
//! into its single terminal error state.

use super::feature::FeatureCollection;
use super::raw::FeatureCollectionRaw;
use crate::error::{DashError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl FeatureCollection {
    /// Parses an in-memory GeoJSON payload.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: FeatureCollectionRaw = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: FeatureCollectionRaw = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Loads a boundary file from disk. `*.gz` files are decompressed when
    /// the `compact` feature is enabled.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = open_stream(path.as_ref())?;
        Self::from_reader(reader)
    }
}

// -----------------------------------------------------------------------
// INTERNAL TRANSPORT HELPER
// -----------------------------------------------------------------------

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the
/// extension says so.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DashError::NotFound(format!("Geography not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    if !gzipped {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(DashError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = FeatureCollection::load_from_path("/definitely/not/here.geojson").unwrap_err();
        assert!(matches!(err, DashError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = FeatureCollection::from_slice(b"{\"type\": \"FeatureCollection\", ").unwrap_err();
        assert!(matches!(err, DashError::Json(_)));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn reads_gzipped_geojson() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]},
             "properties":{"id":"S1","name":"Goa","level":"state"}}]}"#;
        let path = std::env::temp_dir().join(format!("geodash-{}.geojson.gz", std::process::id()));
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(body).unwrap();
        enc.finish().unwrap();

        let fc = FeatureCollection::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(fc.stats().states, 1);
    }
}
