//! Bzip2 via the bzip2 crate. One complete bzip2 stream per chunk;
//! concatenated streams are what `bzcat` reads.

use std::io::{self, Read, Write};

use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use bzip2::Compression;

use crate::codec::types::{Algorithm, Codec, CodecError};

pub struct Bzip2Codec;

impl Codec for Bzip2Codec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bzip2
    }

    fn shrink(&self, input: &[u8], out: &mut dyn Write) -> Result<(), CodecError> {
        let mut enc = BzEncoder::new(out, Compression::best());
        enc.write_all(input)
            .map_err(|e| CodecError::shrink(Algorithm::Bzip2, e))?;
        enc.finish()
            .map(drop)
            .map_err(|e| CodecError::shrink(Algorithm::Bzip2, e))
    }

    fn verify(&self, input: &mut dyn Read) -> Result<(), CodecError> {
        let mut dec = MultiBzDecoder::new(input);
        io::copy(&mut dec, &mut io::sink())
            .map(drop)
            .map_err(|e| CodecError::verify(Algorithm::Bzip2, e))
    }
}
