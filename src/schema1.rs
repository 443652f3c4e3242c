//! Schema 1 images exposed through the [`Image`] interface
//!
//! Schema 1 manifests only list layer blob digests. There is no config blob
//! and no size information, so those answers are synthesized (config) or
//! refused (layer size).

use std::io::Read;
use std::sync::Arc;

use crate::digest::Digest;
use crate::empty;
use crate::error::{Error, Result};
use crate::manifest;
use crate::media_type::MediaType;
use crate::partial;
use crate::source::BlobSource;
use crate::v1::{BlobReader, CompressedLayer, Image, Layer};

/// A layer known only by its blob digest
pub struct LegacyLayer {
    source: Arc<dyn BlobSource>,
    digest: Digest,
}

impl LegacyLayer {
    pub fn new(source: Arc<dyn BlobSource>, digest: Digest) -> Self {
        LegacyLayer { source, digest }
    }
}

impl CompressedLayer for LegacyLayer {
    fn compressed(&self) -> Result<BlobReader> {
        self.source.blob(&self.digest)
    }

    fn digest(&self) -> Result<Digest> {
        Ok(self.digest.clone())
    }

    fn media_type(&self) -> Result<MediaType> {
        Ok(MediaType::DOCKER_LAYER)
    }

    /// Always fails: schema 1 manifests do not record sizes
    fn size(&self) -> Result<u64> {
        Err(Error::UnknownSize(self.digest.clone()))
    }
}

/// An image backed by a schema 1 manifest
pub struct LegacyImage {
    manifest: Vec<u8>,
    source: Arc<dyn BlobSource>,
    digest: Digest,
    media_type: MediaType,
}

impl std::fmt::Debug for LegacyImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyImage")
            .field("digest", &self.digest)
            .field("media_type", &self.media_type)
            .field("manifest_len", &self.manifest.len())
            .finish()
    }
}

impl Image for LegacyImage {
    /// Layers in manifest order, which for schema 1 is most recent first.
    /// Callers wanting base-first order must reverse the result.
    fn layers(&self) -> Result<Vec<Arc<dyn Layer>>> {
        manifest::parse_manifest(&self.manifest)?
            .iter()
            .map(|digest| self.layer_by_digest(digest))
            .collect()
    }

    fn layer_by_digest(&self, digest: &Digest) -> Result<Arc<dyn Layer>> {
        if let Some(layers) = self.source.as_layer_source() {
            tracing::debug!(digest = %digest, "Fetching layer from layer source");
            return layers.layer_by_digest(digest);
        }

        tracing::debug!(digest = %digest, "Wrapping blob as schema 1 layer");
        let compressed = LegacyLayer::new(Arc::clone(&self.source), digest.clone());
        Ok(partial::compressed_to_layer(Arc::new(compressed)))
    }

    fn raw_manifest(&self) -> Result<&[u8]> {
        Ok(self.manifest.as_slice())
    }

    fn raw_config_file(&self) -> Result<&[u8]> {
        Ok(empty::config().raw())
    }

    fn config_name(&self) -> Result<Digest> {
        Ok(empty::config().digest().clone())
    }

    /// Length of the manifest itself, not of the image content
    fn size(&self) -> Result<u64> {
        Ok(self.manifest.len() as u64)
    }

    fn media_type(&self) -> Result<MediaType> {
        Ok(self.media_type.clone())
    }

    fn digest(&self) -> Result<Digest> {
        Ok(self.digest.clone())
    }
}

/// Fetch the manifest blob for `digest` from `source` and wrap it
///
/// Nothing is returned unless the whole manifest was read.
pub fn child(source: Arc<dyn BlobSource>, digest: Digest, media_type: MediaType) -> Result<LegacyImage> {
    let mut manifest = Vec::new();
    source.blob(&digest)?.read_to_end(&mut manifest)?;

    tracing::debug!(digest = %digest, bytes = manifest.len(), "Fetched schema 1 manifest");

    Ok(new(source, digest, media_type, manifest))
}

/// Wrap manifest bytes that were already fetched
///
/// The manifest is not parsed until layers are requested.
pub fn new(source: Arc<dyn BlobSource>, digest: Digest, media_type: MediaType, manifest: Vec<u8>) -> LegacyImage {
    LegacyImage {
        manifest,
        source,
        digest,
        media_type,
    }
}
