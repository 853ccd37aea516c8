// Push-style writer tests: incremental writes of arbitrary sizes must
// produce the same stream as one large write, write() must fail fast after
// a recorded failure, and finish() must surface the first error.

use std::io::{Read, Write};
use std::sync::Arc;

use parz_core::codec::registry;
use parz_core::pipeline::{CompressWriter, PoolProfile};
use parz_core::{Algorithm, Codec, CodecError, PipelineError};

// ------------------------------------------------------------
// Helpers
// ------------------------------------------------------------
fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 % 241) as u8).collect()
}

fn gunzip_multi(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::MultiGzDecoder::new(data)
        .read_to_end(&mut out)
        .expect("gzip decode failed");
    out
}

struct FailingCodec;

impl Codec for FailingCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn shrink(&self, _input: &[u8], _out: &mut dyn Write) -> Result<(), CodecError> {
        Err(CodecError::Shrink {
            codec: "gz",
            msg: "synthetic failure".into(),
        })
    }

    fn verify(&self, _input: &mut dyn Read) -> Result<(), CodecError> {
        Ok(())
    }
}

// ------------------------------------------------------------
// Tests
// ------------------------------------------------------------
#[test]
fn incremental_writes_match_one_big_write() {
    let data = patterned(40_000);
    let profile = PoolProfile::new(2, 2, 1024);
    let codec = registry::create(Algorithm::Gzip);

    // Feed the stream in awkward uneven pieces.
    let mut writer =
        CompressWriter::new(Vec::new(), Arc::clone(&codec), &profile).expect("spawn failed");
    let mut off = 0;
    for &piece in &[3usize, 700, 1, 5000, 2048, 10_000, 999] {
        let end = (off + piece).min(data.len());
        writer.write_all(&data[off..end]).unwrap();
        off = end;
    }
    writer.write_all(&data[off..]).unwrap();
    let (incremental, summary) = writer.finish().expect("finish failed");

    assert_eq!(summary.bytes_in, data.len() as u64);
    assert_eq!(summary.bytes_out, incremental.len() as u64);
    assert_eq!(gunzip_multi(&incremental), data);

    // A single write of the whole buffer chunks differently but must decode
    // to the same stream.
    let mut writer = CompressWriter::new(Vec::new(), codec, &profile).expect("spawn failed");
    writer.write_all(&data).unwrap();
    let (single, _) = writer.finish().expect("finish failed");
    assert_eq!(gunzip_multi(&single), data);
}

#[test]
fn one_write_splits_into_chunk_sized_parts() {
    let data = patterned(10_240);
    let profile = PoolProfile::new(4, 4, 1024);

    let mut writer = CompressWriter::new(Vec::new(), registry::create(Algorithm::Zstd), &profile)
        .expect("spawn failed");
    writer.write_all(&data).unwrap();
    let (out, summary) = writer.finish().expect("finish failed");

    assert_eq!(summary.parts, 10);
    assert!(!out.is_empty());
}

#[test]
fn finish_without_writes_is_clean() {
    let profile = PoolProfile::new(2, 2, 4096);
    let writer = CompressWriter::new(Vec::new(), registry::create(Algorithm::Gzip), &profile)
        .expect("spawn failed");

    let (out, summary) = writer.finish().expect("finish failed");
    assert!(out.is_empty());
    assert_eq!(summary.parts, 0);
    assert_eq!(summary.bytes_in, 0);
}

#[test]
fn empty_writes_are_noops() {
    let data = patterned(2048);
    let profile = PoolProfile::new(1, 1, 1024);

    let mut writer = CompressWriter::new(Vec::new(), registry::create(Algorithm::Gzip), &profile)
        .expect("spawn failed");
    assert_eq!(writer.write(&[]).unwrap(), 0);
    writer.write_all(&data).unwrap();
    let (out, summary) = writer.finish().expect("finish failed");

    assert_eq!(summary.parts, 2);
    assert_eq!(gunzip_multi(&out), data);
}

#[test]
fn minimal_pool_and_queues_do_not_deadlock() {
    let data = patterned(50_000);
    let profile = PoolProfile::new(1, 1, 512);

    let mut writer = CompressWriter::new(Vec::new(), registry::create(Algorithm::Gzip), &profile)
        .expect("spawn failed");
    writer.write_all(&data).unwrap();
    let (out, _) = writer.finish().expect("finish failed");

    assert_eq!(gunzip_multi(&out), data);
}

#[test]
fn finish_surfaces_the_codec_error() {
    let data = patterned(4096);
    let profile = PoolProfile::new(2, 2, 512);

    let mut writer =
        CompressWriter::new(Vec::new(), Arc::new(FailingCodec), &profile).expect("spawn failed");
    // The send may already fail fast if a worker recorded the error first.
    let _ = writer.write_all(&data);
    let err = writer.finish().expect_err("finish must fail");

    assert!(
        matches!(
            err,
            PipelineError::Codec(CodecError::Shrink { codec: "gz", .. })
        ),
        "unexpected error: {err}"
    );
}

// With a capacity-1 job queue and one worker, the k-th write can only
// complete after the worker has fully processed part k-2, so a recorded
// failure must stop writes within a bounded number of calls.
#[test]
fn write_fails_fast_after_recorded_failure() {
    let chunk = patterned(512);
    let profile = PoolProfile::new(1, 1, 512);

    let mut writer =
        CompressWriter::new(Vec::new(), Arc::new(FailingCodec), &profile).expect("spawn failed");

    let mut failed = None;
    for attempt in 0..10 {
        if let Err(e) = writer.write(&chunk) {
            failed = Some((attempt, e));
            break;
        }
    }
    let (_, err) = failed.expect("write never failed fast");
    assert!(err.to_string().contains("synthetic failure"), "{err}");

    // Abandoning the writer must tear the pool down without hanging.
    drop(writer);
}
