//! codec/types.rs
//! Algorithm identifiers and the shrink/verify capability contract.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use thiserror::Error;

/// Closed set of supported compression algorithms. Adding a codec means
/// adding a variant here and an arm in the registry; the pipeline never
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Algorithm {
    pub const ALL: &'static [Algorithm] = &[
        Algorithm::Gzip,
        Algorithm::Bzip2,
        Algorithm::Xz,
        Algorithm::Zstd,
    ];

    /// Canonical short name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Gzip => "gz",
            Algorithm::Bzip2 => "bz2",
            Algorithm::Xz => "xz",
            Algorithm::Zstd => "zstd",
        }
    }

    /// Conventional output file suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Algorithm::Gzip => "gz",
            Algorithm::Bzip2 => "bz2",
            Algorithm::Xz => "xz",
            Algorithm::Zstd => "zst",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gz" | "gzip" => Ok(Algorithm::Gzip),
            "bz2" | "bzip2" => Ok(Algorithm::Bzip2),
            "xz" => Ok(Algorithm::Xz),
            "zstd" | "zst" => Ok(Algorithm::Zstd),
            other => Err(CodecError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Stateless compression capability shared by every worker in a pipeline.
///
/// `shrink` compresses one chunk into an independently framed block written
/// to the sink; `verify` consumes a whole stream of such blocks and succeeds
/// iff it is structurally valid for the codec's format.
pub trait Codec: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn shrink(&self, input: &[u8], out: &mut dyn Write) -> Result<(), CodecError>;

    fn verify(&self, input: &mut dyn Read) -> Result<(), CodecError>;
}

#[derive(Debug, Clone, Error)]
pub enum CodecError {
    #[error("unknown compression algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("{codec} shrink failed: {msg}")]
    Shrink { codec: &'static str, msg: String },

    #[error("{codec} verification failed: {msg}")]
    Verify { codec: &'static str, msg: String },
}

impl CodecError {
    pub(crate) fn shrink(algo: Algorithm, e: impl fmt::Display) -> Self {
        CodecError::Shrink {
            codec: algo.name(),
            msg: e.to_string(),
        }
    }

    pub(crate) fn verify(algo: Algorithm, e: impl fmt::Display) -> Self {
        CodecError::Verify {
            codec: algo.name(),
            msg: e.to_string(),
        }
    }
}
