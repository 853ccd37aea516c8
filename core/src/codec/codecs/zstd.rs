//! Zstd. One frame per chunk; the stream decoder reads concatenated frames
//! until end of input.

use std::io::{self, Read, Write};

use crate::codec::types::{Algorithm, Codec, CodecError};

const ZSTD_LEVEL: i32 = 3;

pub struct ZstdCodec;

impl Codec for ZstdCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Zstd
    }

    fn shrink(&self, input: &[u8], out: &mut dyn Write) -> Result<(), CodecError> {
        zstd::stream::copy_encode(input, out, ZSTD_LEVEL)
            .map_err(|e| CodecError::shrink(Algorithm::Zstd, e))
    }

    fn verify(&self, input: &mut dyn Read) -> Result<(), CodecError> {
        let mut dec = zstd::stream::read::Decoder::new(input)
            .map_err(|e| CodecError::verify(Algorithm::Zstd, e))?;
        io::copy(&mut dec, &mut io::sink())
            .map(drop)
            .map_err(|e| CodecError::verify(Algorithm::Zstd, e))
    }
}
