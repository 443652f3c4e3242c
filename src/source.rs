//! Blob sources: where manifests and layer blobs come from

use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::v1::{BlobReader, Layer};

/// Anything that can hand out a blob by digest
pub trait BlobSource: Send + Sync {
    /// Open the blob for `digest`
    ///
    /// Fails with [`Error::NotFound`] when the blob does not exist and
    /// [`Error::Io`] for anything else.
    fn blob(&self, digest: &Digest) -> Result<BlobReader>;

    /// Capability query for sources that can build full layers themselves
    fn as_layer_source(&self) -> Option<&dyn LayerSource> {
        None
    }
}

/// Optional richer capability: produce a complete layer by digest
pub trait LayerSource: Send + Sync {
    fn layer_by_digest(&self, digest: &Digest) -> Result<Arc<dyn Layer>>;
}

/// Blobs stored on disk as `<root>/<algorithm>/<hex>`
///
/// This is the layout of an OCI image layout's `blobs/` directory.
#[derive(Debug, Clone)]
pub struct DirBlobSource {
    root: PathBuf,
}

impl DirBlobSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirBlobSource { root: root.into() }
    }

    /// Path a blob would live at
    pub fn blob_path(&self, digest: &Digest) -> PathBuf {
        self.root.join(digest.algorithm()).join(digest.hex())
    }
}

impl BlobSource for DirBlobSource {
    fn blob(&self, digest: &Digest) -> Result<BlobReader> {
        let path = self.blob_path(digest);
        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(Error::NotFound(digest.clone())),
            Err(err) => Err(Error::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_dir_blob_source_reads_blob() {
        let dir = tempfile::tempdir().unwrap();
        let digest = Digest::sha256(b"hello");
        std::fs::create_dir_all(dir.path().join("sha256")).unwrap();
        std::fs::write(dir.path().join("sha256").join(digest.hex()), b"hello").unwrap();

        let source = DirBlobSource::new(dir.path());
        let mut buf = String::new();
        source.blob(&digest).unwrap().read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "hello");
    }

    #[test]
    fn test_dir_blob_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirBlobSource::new(dir.path());
        let digest = Digest::sha256(b"missing");

        match source.blob(&digest) {
            Err(Error::NotFound(d)) => assert_eq!(d, digest),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_dir_blob_source_has_no_layer_capability() {
        let source = DirBlobSource::new("/nonexistent");
        assert!(source.as_layer_source().is_none());
    }
}
