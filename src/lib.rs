//! Read legacy Docker schema 1 manifests as ordinary images
//!
//! [`schema1::child`] fetches a manifest from a [`BlobSource`] and
//! [`schema1::new`] wraps bytes already in hand. Either way the result
//! implements [`Image`], so callers can treat schema 1 and newer images alike.

pub mod digest;
pub mod empty;
pub mod error;
pub mod manifest;
pub mod media_type;
pub mod partial;
pub mod schema1;
pub mod source;
pub mod v1;

pub use digest::Digest;
pub use error::{Error, Result};
pub use media_type::MediaType;
pub use schema1::{LegacyImage, LegacyLayer};
pub use source::{BlobSource, DirBlobSource, LayerSource};
pub use v1::{BlobReader, CompressedLayer, Image, Layer};
