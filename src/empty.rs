//! The canonical empty config, shared by every legacy image

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::digest::Digest;

#[derive(Serialize)]
struct ConfigFile {
    architecture: &'static str,
    os: &'static str,
    config: Empty,
    rootfs: RootFs,
}

#[derive(Serialize)]
struct Empty {}

#[derive(Serialize)]
struct RootFs {
    #[serde(rename = "type")]
    kind: &'static str,
    diff_ids: Vec<Digest>,
}

/// Encoded bytes of the empty config and their digest
#[derive(Debug)]
pub struct EmptyConfig {
    raw: Vec<u8>,
    digest: Digest,
}

impl EmptyConfig {
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }
}

static EMPTY_CONFIG: Lazy<EmptyConfig> = Lazy::new(|| {
    let file = ConfigFile {
        architecture: "",
        os: "",
        config: Empty {},
        rootfs: RootFs {
            kind: "layers",
            diff_ids: Vec::new(),
        },
    };
    // Serializing plain structs of strings cannot fail
    let raw = serde_json::to_vec(&file).unwrap_or_default();
    let digest = Digest::sha256(&raw);
    EmptyConfig { raw, digest }
});

/// The process-wide empty config
pub fn config() -> &'static EmptyConfig {
    &EMPTY_CONFIG
}
