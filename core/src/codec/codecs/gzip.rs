//! Gzip via flate2. Each chunk becomes its own gzip member; `gunzip` and
//! `MultiGzDecoder` both accept the concatenated members.

use std::io::{self, Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::codec::types::{Algorithm, Codec, CodecError};

pub struct GzipCodec;

impl Codec for GzipCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn shrink(&self, input: &[u8], out: &mut dyn Write) -> Result<(), CodecError> {
        let mut enc = GzEncoder::new(out, Compression::best());
        enc.write_all(input)
            .map_err(|e| CodecError::shrink(Algorithm::Gzip, e))?;
        enc.finish()
            .map(drop)
            .map_err(|e| CodecError::shrink(Algorithm::Gzip, e))
    }

    fn verify(&self, input: &mut dyn Read) -> Result<(), CodecError> {
        let mut dec = MultiGzDecoder::new(input);
        io::copy(&mut dec, &mut io::sink())
            .map(drop)
            .map_err(|e| CodecError::verify(Algorithm::Gzip, e))
    }
}
