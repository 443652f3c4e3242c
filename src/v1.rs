//! Capability sets shared by legacy and modern images
//!
//! Streams handed out by these traits belong to the caller; dropping them
//! releases whatever the blob source opened.

use std::io::Read;
use std::sync::Arc;

use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::media_type::MediaType;

/// Byte stream returned by blob sources and layers
pub type BlobReader = Box<dyn Read + Send>;

/// The minimum a layer must provide: its compressed bytes and identity
pub trait CompressedLayer: Send + Sync {
    /// Open the compressed blob
    fn compressed(&self) -> Result<BlobReader>;

    /// Digest of the compressed blob
    fn digest(&self) -> Result<Digest>;

    fn media_type(&self) -> Result<MediaType>;

    /// Size of the compressed blob in bytes
    fn size(&self) -> Result<u64>;
}

/// A full layer, also exposing its uncompressed contents
pub trait Layer: CompressedLayer {
    /// Digest of the uncompressed tarball
    fn diff_id(&self) -> Result<Digest>;

    fn uncompressed(&self) -> Result<BlobReader>;
}

/// An image: an ordered set of layers plus manifest and config
pub trait Image: Send + Sync {
    fn layers(&self) -> Result<Vec<Arc<dyn Layer>>>;

    fn layer_by_digest(&self, digest: &Digest) -> Result<Arc<dyn Layer>>;

    /// Manifest bytes exactly as stored
    fn raw_manifest(&self) -> Result<&[u8]>;

    fn raw_config_file(&self) -> Result<&[u8]>;

    /// Digest of the config blob
    fn config_name(&self) -> Result<Digest>;

    fn size(&self) -> Result<u64>;

    fn media_type(&self) -> Result<MediaType>;

    /// Digest of the manifest
    fn digest(&self) -> Result<Digest>;

    /// Decoded config file
    fn config_file(&self) -> Result<serde_json::Value> {
        Err(Error::Unsupported("config_file"))
    }

    fn layer_by_diff_id(&self, _diff_id: &Digest) -> Result<Arc<dyn Layer>> {
        Err(Error::Unsupported("layer_by_diff_id"))
    }
}
