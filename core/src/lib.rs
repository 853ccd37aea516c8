//! parz-core
//!
//! Parallel chunked streaming compression engine: input is split into
//! sequence-numbered chunks, compressed concurrently by a worker pool, and
//! reassembled in strict input order. The output is a concatenation of
//! independently framed codec blocks; decompress it with a multi-block-aware
//! reader for the chosen algorithm.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

// Codec and pipeline layers
pub mod codec;
pub mod pipeline;

pub use codec::{Algorithm, Codec, CodecError};
pub use pipeline::{run_compress_pipeline, CompressSummary, CompressWriter, PoolProfile};
pub use types::PipelineError;
