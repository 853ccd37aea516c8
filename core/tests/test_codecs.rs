// Codec contract tests: every algorithm must produce independently framed
// blocks that its own multi-block reader accepts, and verify must tell valid
// streams from garbage.

use std::io::Read;

use parz_core::codec::registry;
use parz_core::Algorithm;

// ------------------------------------------------------------
// Helpers
// ------------------------------------------------------------
fn decode_multi(algo: Algorithm, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    match algo {
        Algorithm::Gzip => {
            flate2::read::MultiGzDecoder::new(data)
                .read_to_end(&mut out)
                .expect("gzip decode failed");
        }
        Algorithm::Bzip2 => {
            bzip2::read::MultiBzDecoder::new(data)
                .read_to_end(&mut out)
                .expect("bzip2 decode failed");
        }
        Algorithm::Xz => {
            xz2::read::XzDecoder::new_multi_decoder(data)
                .read_to_end(&mut out)
                .expect("xz decode failed");
        }
        Algorithm::Zstd => {
            zstd::stream::read::Decoder::new(data)
                .expect("zstd decoder init failed")
                .read_to_end(&mut out)
                .expect("zstd decode failed");
        }
    }
    out
}

fn shrink(algo: Algorithm, input: &[u8]) -> Vec<u8> {
    let codec = registry::create(algo);
    let mut out = Vec::new();
    codec.shrink(input, &mut out).expect("shrink failed");
    out
}

// ------------------------------------------------------------
// Tests
// ------------------------------------------------------------
#[test]
fn shrink_then_verify_roundtrip() {
    let data = b"the quick brown fox jumps over the lazy dog, repeatedly".repeat(100);

    for &algo in Algorithm::ALL {
        let codec = registry::create(algo);
        let block = shrink(algo, &data);
        assert!(!block.is_empty(), "{algo}: empty block");

        codec
            .verify(&mut &block[..])
            .unwrap_or_else(|e| panic!("{algo}: verify rejected own output: {e}"));

        assert_eq!(decode_multi(algo, &block), data, "{algo}: roundtrip mismatch");
    }
}

#[test]
fn shrink_of_empty_buffer_still_verifies() {
    for &algo in Algorithm::ALL {
        let codec = registry::create(algo);
        let block = shrink(algo, &[]);
        assert!(!block.is_empty(), "{algo}: empty input must still be framed");

        codec
            .verify(&mut &block[..])
            .unwrap_or_else(|e| panic!("{algo}: verify rejected empty-input block: {e}"));

        assert!(decode_multi(algo, &block).is_empty());
    }
}

#[test]
fn verify_rejects_garbage() {
    let garbage = b"this is definitely not a compressed stream of any kind....";

    for &algo in Algorithm::ALL {
        let codec = registry::create(algo);
        assert!(
            codec.verify(&mut &garbage[..]).is_err(),
            "{algo}: verify accepted garbage"
        );
    }
}

#[test]
fn concatenated_blocks_decode_as_one_stream() {
    let first = b"first independent chunk ".repeat(50);
    let second = b"and a second one, different content".repeat(50);

    for &algo in Algorithm::ALL {
        let codec = registry::create(algo);

        let mut stream = shrink(algo, &first);
        stream.extend_from_slice(&shrink(algo, &second));

        codec
            .verify(&mut &stream[..])
            .unwrap_or_else(|e| panic!("{algo}: verify rejected concatenation: {e}"));

        let mut expected = first.clone();
        expected.extend_from_slice(&second);
        assert_eq!(decode_multi(algo, &stream), expected, "{algo}");
    }
}

#[test]
fn algorithm_name_resolution() {
    assert_eq!(registry::resolve("gz").unwrap(), Algorithm::Gzip);
    assert_eq!(registry::resolve("gzip").unwrap(), Algorithm::Gzip);
    assert_eq!(registry::resolve("bz2").unwrap(), Algorithm::Bzip2);
    assert_eq!(registry::resolve("bzip2").unwrap(), Algorithm::Bzip2);
    assert_eq!(registry::resolve("xz").unwrap(), Algorithm::Xz);
    assert_eq!(registry::resolve("zstd").unwrap(), Algorithm::Zstd);
    assert_eq!(registry::resolve("XZ").unwrap(), Algorithm::Xz);

    // No silent fallback for unknown names.
    assert!(registry::resolve("lzma").is_err());
    assert!(registry::resolve("").is_err());
}

#[test]
fn algorithm_names_and_suffixes() {
    assert_eq!(Algorithm::Gzip.name(), "gz");
    assert_eq!(Algorithm::Bzip2.name(), "bz2");
    assert_eq!(Algorithm::Xz.name(), "xz");
    assert_eq!(Algorithm::Zstd.name(), "zstd");
    assert_eq!(Algorithm::Zstd.suffix(), "zst");
    assert_eq!(Algorithm::Gzip.to_string(), "gz");
}
