//! Turn a [`CompressedLayer`] into a full [`Layer`]

use flate2::read::GzDecoder;
use once_cell::sync::OnceCell;
use sha2::{Digest as _, Sha256};
use std::io;
use std::sync::Arc;

use crate::digest::Digest;
use crate::error::Result;
use crate::media_type::MediaType;
use crate::v1::{BlobReader, CompressedLayer, Layer};

struct CompressedLayerExtender {
    inner: Arc<dyn CompressedLayer>,
    diff_id: OnceCell<Digest>,
}

/// Wrap a compressed-only layer so it can answer uncompressed queries
///
/// The uncompressed stream is a gzip decoder over `compressed()`. The diff ID
/// is computed on first request and cached; a failed computation is retried
/// on the next call.
pub fn compressed_to_layer(inner: Arc<dyn CompressedLayer>) -> Arc<dyn Layer> {
    Arc::new(CompressedLayerExtender {
        inner,
        diff_id: OnceCell::new(),
    })
}

impl CompressedLayer for CompressedLayerExtender {
    fn compressed(&self) -> Result<BlobReader> {
        self.inner.compressed()
    }

    fn digest(&self) -> Result<Digest> {
        self.inner.digest()
    }

    fn media_type(&self) -> Result<MediaType> {
        self.inner.media_type()
    }

    fn size(&self) -> Result<u64> {
        self.inner.size()
    }
}

impl Layer for CompressedLayerExtender {
    fn diff_id(&self) -> Result<Digest> {
        let digest = self.diff_id.get_or_try_init(|| {
            let mut reader = self.uncompressed()?;
            let mut hasher = Sha256::new();
            io::copy(&mut reader, &mut hasher)?;
            Ok::<_, crate::error::Error>(Digest::from_sha256(hasher.finalize().as_slice()))
        })?;

        Ok(digest.clone())
    }

    fn uncompressed(&self) -> Result<BlobReader> {
        let compressed = self.inner.compressed()?;
        Ok(Box::new(GzDecoder::new(compressed)))
    }
}
