//! Xz via xz2 (liblzma). One complete xz stream per chunk; verification uses
//! the multi-stream decoder so concatenated chunks read as one stream.

use std::io::{self, Read, Write};

use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use crate::codec::types::{Algorithm, Codec, CodecError};

/// Conventional `xz -6` preset.
const XZ_LEVEL: u32 = 6;

pub struct XzCodec;

impl Codec for XzCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Xz
    }

    fn shrink(&self, input: &[u8], out: &mut dyn Write) -> Result<(), CodecError> {
        let mut enc = XzEncoder::new(out, XZ_LEVEL);
        enc.write_all(input)
            .map_err(|e| CodecError::shrink(Algorithm::Xz, e))?;
        enc.finish()
            .map(drop)
            .map_err(|e| CodecError::shrink(Algorithm::Xz, e))
    }

    fn verify(&self, input: &mut dyn Read) -> Result<(), CodecError> {
        let mut dec = XzDecoder::new_multi_decoder(input);
        io::copy(&mut dec, &mut io::sink())
            .map(drop)
            .map_err(|e| CodecError::verify(Algorithm::Xz, e))
    }
}
