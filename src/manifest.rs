use serde::Deserialize;
use serde_json::Deserializer;

use crate::digest::Digest;
use crate::error::{Error, Result};

/// Schema 1 manifest structure
/// Only the layer list is read; signatures, history and the rest are ignored
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Absent and `null` both mean no layers
    #[serde(rename = "fsLayers", default)]
    pub fs_layers: Option<Vec<FsLayer>>,
}

#[derive(Debug, Deserialize)]
pub struct FsLayer {
    #[serde(rename = "blobSum")]
    pub blob_sum: String,
}

/// Parse a schema 1 manifest into its ordered layer digests
///
/// The order is the manifest's own: most recent layer first. Only the first
/// JSON value is read; anything after it is ignored.
pub fn parse_manifest(manifest_bytes: &[u8]) -> Result<Vec<Digest>> {
    let mut deserializer = Deserializer::from_slice(manifest_bytes);
    let manifest = Manifest::deserialize(&mut deserializer).map_err(Error::Parse)?;

    let digests = manifest
        .fs_layers
        .unwrap_or_default()
        .iter()
        .map(|fs| fs.blob_sum.parse())
        .collect::<Result<Vec<Digest>>>()?;

    tracing::debug!(layers = digests.len(), "Parsed schema 1 manifest");

    Ok(digests)
}
