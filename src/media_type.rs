//! Media type tags for manifests, configs and layers

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaType(Cow<'static, str>);

impl MediaType {
    /// Unsigned schema 1 manifest
    pub const DOCKER_MANIFEST_SCHEMA1: MediaType =
        MediaType::from_static("application/vnd.docker.distribution.manifest.v1+json");

    /// Signed schema 1 manifest (what registries actually serve)
    pub const DOCKER_MANIFEST_SCHEMA1_SIGNED: MediaType =
        MediaType::from_static("application/vnd.docker.distribution.manifest.v1+prettyjws");

    /// Gzipped layer tarball, the only layer kind schema 1 knows about
    pub const DOCKER_LAYER: MediaType =
        MediaType::from_static("application/vnd.docker.image.rootfs.diff.tar.gzip");

    pub const fn from_static(s: &'static str) -> Self {
        MediaType(Cow::Borrowed(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_schema1(&self) -> bool {
        *self == Self::DOCKER_MANIFEST_SCHEMA1 || *self == Self::DOCKER_MANIFEST_SCHEMA1_SIGNED
    }
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        MediaType(Cow::Owned(s))
    }
}

impl From<&str> for MediaType {
    fn from(s: &str) -> Self {
        MediaType(Cow::Owned(s.to_string()))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_schema1() {
        assert!(MediaType::DOCKER_MANIFEST_SCHEMA1.is_schema1());
        assert!(MediaType::from("application/vnd.docker.distribution.manifest.v1+prettyjws").is_schema1());
        assert!(!MediaType::DOCKER_LAYER.is_schema1());
        assert!(!MediaType::from("application/vnd.oci.image.manifest.v1+json").is_schema1());
    }

    #[test]
    fn test_owned_equals_static() {
        let owned = MediaType::from(String::from("application/vnd.docker.image.rootfs.diff.tar.gzip"));
        assert_eq!(owned, MediaType::DOCKER_LAYER);
        assert_eq!(owned.to_string(), MediaType::DOCKER_LAYER.as_str());
    }
}
