//! The chunk-dispatch / worker-pool / reorder-emit pipeline.
//!
//! Data flow: input → chunker → job queue → worker pool → result queue →
//! reorder/emit → output sink. Both queues are bounded, which stalls the
//! chunker when the pool is busy and stalls workers when the emit stage is
//! behind — memory stays at O(pool × chunk size) regardless of input length.
//!
//! Output byte order equals input byte order. This is enforced solely by the
//! emit stage's sequence discipline; workers are never assumed to finish in
//! dispatch order. Shutdown is marker-driven: after end-of-input the chunker
//! releases each worker with one end marker, and the emit stage stops at the
//! first marker its sequence counter reaches.

pub mod chunker;
pub mod emit;
pub mod failure;
pub mod io;
pub mod parallelism;
pub mod part;
pub mod worker;
pub mod writer;

use std::io::{Read, Write};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::bounded;
use log::debug;

use crate::codec::Codec;
use crate::types::PipelineError;

pub use chunker::Chunker;
pub use failure::FailureCell;
pub use io::CountingWriter;
pub use parallelism::PoolProfile;
pub use part::Part;
pub use writer::CompressWriter;

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressSummary {
    /// Real (non-marker) parts that flowed through the pipeline.
    pub parts: u64,
    /// Bytes accepted from the input stream.
    pub bytes_in: u64,
    /// Bytes actually emitted by the codec into the output sink.
    pub bytes_out: u64,
}

/// Run the whole pipeline over a pull-style input: the chunker on its own
/// thread, one worker per pool slot, reorder/emit on the calling thread.
///
/// All-or-nothing from the caller's perspective: the first error recorded
/// anywhere surfaces here after the pool has drained, and bytes already
/// flushed to `output` before the failing point remain written — the
/// presence of output is not success.
pub fn run_compress_pipeline<R, W>(
    input: R,
    output: &mut W,
    codec: Arc<dyn Codec>,
    profile: &PoolProfile,
) -> Result<CompressSummary, PipelineError>
where
    R: Read + Send,
    W: Write,
{
    let failure = FailureCell::new();
    let (jobs_tx, jobs_rx) = bounded::<Part>(profile.queue_depth);
    let (results_tx, results_rx) = bounded::<Part>(profile.queue_depth);

    debug!(
        "compress pipeline: algo={}, workers={}, queue_depth={}, chunk_size={}",
        codec.algorithm(),
        profile.workers,
        profile.queue_depth,
        profile.chunk_size
    );

    let mut counted = io::CountingWriter::new(output);
    let mut summary = CompressSummary::default();

    thread::scope(|scope| {
        // ---- Chunker ----
        let chunker_cell = failure.clone();
        let chunk_size = profile.chunk_size;
        let pool_size = profile.workers;
        let reader = scope.spawn(move || {
            let mut chunker = Chunker::new(chunk_size);
            chunker::run_chunker(input, &mut chunker, &jobs_tx, pool_size, &chunker_cell)
        });

        // ---- Workers ----
        for _ in 0..profile.workers {
            let rx = jobs_rx.clone();
            let tx = results_tx.clone();
            let codec = Arc::clone(&codec);
            let cell = failure.clone();
            scope.spawn(move || worker::run_compression_worker(codec, rx, tx, cell));
        }
        drop(jobs_rx);
        drop(results_tx);

        // ---- Reorder/emit on this thread ----
        let emitted = emit::run_emit(&mut counted, &results_rx, &failure);
        // Unblock any worker still pushing a surplus end marker.
        drop(results_rx);
        debug!("compress pipeline: emitted {emitted} parts");

        match reader.join() {
            Ok((bytes_in, parts)) => {
                summary.bytes_in = bytes_in;
                summary.parts = parts;
            }
            Err(_) => {
                failure.record(PipelineError::Disconnected("chunker thread panicked"));
            }
        }
    });
    summary.bytes_out = counted.bytes_written();

    failure.check()?;
    Ok(summary)
}
