//! codec/registry.rs
//! Algorithm lookup and codec factory.

use std::sync::Arc;

use crate::codec::codecs::{bzip2::Bzip2Codec, gzip::GzipCodec, xz::XzCodec, zstd::ZstdCodec};
use crate::codec::types::{Algorithm, Codec, CodecError};

/// Strict name lookup. Unknown names are an error, never a silent default.
pub fn resolve(name: &str) -> Result<Algorithm, CodecError> {
    name.parse()
}

/// Construct the codec for an algorithm. Codecs are stateless per call, so
/// one shared instance serves the whole worker pool.
pub fn create(algo: Algorithm) -> Arc<dyn Codec> {
    match algo {
        Algorithm::Gzip => Arc::new(GzipCodec),
        Algorithm::Bzip2 => Arc::new(Bzip2Codec),
        Algorithm::Xz => Arc::new(XzCodec),
        Algorithm::Zstd => Arc::new(ZstdCodec),
    }
}
