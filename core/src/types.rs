use thiserror::Error;

use crate::codec::CodecError;

/// Unified pipeline error covering input I/O, output I/O, and codec failures.
///
/// The type is `Clone` so the shared failure cell can hand the stored error
/// to both the fail-fast `write` path and the final `finish` read; foreign
/// I/O errors are captured as messages at the boundary.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Reading the input stream failed (not end-of-input).
    #[error("input read failed: {0}")]
    InputIo(String),

    /// Writing the compressed stream failed, including short writes.
    #[error("output write failed: {0}")]
    OutputIo(String),

    /// A codec rejected a chunk. Chunks are never retried.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A pipeline stage went away before the stream terminated.
    #[error("pipeline stage disconnected: {0}")]
    Disconnected(&'static str),
}

impl PipelineError {
    pub(crate) fn input(e: &std::io::Error) -> Self {
        PipelineError::InputIo(e.to_string())
    }

    pub(crate) fn output(e: &std::io::Error) -> Self {
        PipelineError::OutputIo(e.to_string())
    }
}
