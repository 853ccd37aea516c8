//! Streaming-safe chunk compression codecs.
//!
//! Every codec compresses one chunk as an independently framed block;
//! concatenating blocks yields a stream the codec's multi-block decoder
//! accepts. The registry resolves algorithm names to implementations.

pub mod codecs;
pub mod registry;
pub mod types;

pub use registry::{create, resolve};
pub use types::{Algorithm, Codec, CodecError};
