//! Push-style orchestrator: an `io::Write` front end over the pipeline.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{bounded, Sender};
use log::debug;

use crate::codec::Codec;
use crate::pipeline::chunker::Chunker;
use crate::pipeline::emit::run_emit;
use crate::pipeline::failure::FailureCell;
use crate::pipeline::io::CountingWriter;
use crate::pipeline::parallelism::PoolProfile;
use crate::pipeline::part::Part;
use crate::pipeline::worker::run_compression_worker;
use crate::pipeline::CompressSummary;
use crate::types::PipelineError;

/// Push-style compression sink.
///
/// Bytes written are split into chunk-size parts and compressed by the
/// background pool while the emit thread writes finished blocks to the
/// wrapped output in input order. `write` fails fast once any pipeline error
/// has been recorded. Call [`CompressWriter::finish`] to flush the stream
/// and observe the run's outcome; it consumes the writer, so a second close
/// is impossible by construction. Dropping the writer instead abandons the
/// stream and tears the pool down.
pub struct CompressWriter<W: Write + Send + 'static> {
    chunker: Chunker,
    jobs: Option<Sender<Part>>,
    failure: FailureCell,
    workers: Vec<JoinHandle<()>>,
    emit: Option<JoinHandle<(u64, u64, W)>>,
    pool_size: usize,
    bytes_in: u64,
}

impl<W: Write + Send + 'static> CompressWriter<W> {
    /// Spawn the worker pool and the emit thread around `output`.
    pub fn new(output: W, codec: Arc<dyn Codec>, profile: &PoolProfile) -> io::Result<Self> {
        let (jobs_tx, jobs_rx) = bounded::<Part>(profile.queue_depth);
        let (results_tx, results_rx) = bounded::<Part>(profile.queue_depth);
        let failure = FailureCell::new();

        debug!(
            "compress writer: algo={}, workers={}, queue_depth={}, chunk_size={}",
            codec.algorithm(),
            profile.workers,
            profile.queue_depth,
            profile.chunk_size
        );

        let mut workers = Vec::with_capacity(profile.workers);
        for i in 0..profile.workers {
            let rx = jobs_rx.clone();
            let tx = results_tx.clone();
            let codec = Arc::clone(&codec);
            let cell = failure.clone();
            let handle = thread::Builder::new()
                .name(format!("parz-worker-{i}"))
                .spawn(move || run_compression_worker(codec, rx, tx, cell))?;
            workers.push(handle);
        }
        drop(jobs_rx);
        drop(results_tx);

        let cell = failure.clone();
        let emit = thread::Builder::new().name("parz-emit".into()).spawn(move || {
            let mut counted = CountingWriter::new(output);
            let parts = run_emit(&mut counted, &results_rx, &cell);
            // Unblock any worker still pushing a surplus end marker.
            drop(results_rx);
            let bytes_out = counted.bytes_written();
            (parts, bytes_out, counted.into_inner())
        })?;

        Ok(CompressWriter {
            chunker: Chunker::new(profile.chunk_size),
            jobs: Some(jobs_tx),
            failure,
            workers,
            emit: Some(emit),
            pool_size: profile.workers,
            bytes_in: 0,
        })
    }

    /// Flush the stream: release the pool with its end-marker batch, wait
    /// for the emit thread, and surface the first recorded error, if any.
    /// On success returns the wrapped writer and the run's counters.
    pub fn finish(mut self) -> Result<(W, CompressSummary), PipelineError> {
        let jobs = self
            .jobs
            .take()
            .ok_or(PipelineError::Disconnected("job queue already closed"))?;
        for marker in self.chunker.end_markers(self.pool_size) {
            // A disconnect here means every worker is already gone.
            if jobs.send(marker).is_err() {
                break;
            }
        }
        drop(jobs);

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
        let emit = self
            .emit
            .take()
            .ok_or(PipelineError::Disconnected("emit thread already joined"))?;
        let (parts, bytes_out, output) = emit
            .join()
            .map_err(|_| PipelineError::Disconnected("emit thread panicked"))?;

        self.failure.check()?;
        Ok((
            output,
            CompressSummary {
                parts,
                bytes_in: self.bytes_in,
                bytes_out,
            },
        ))
    }
}

impl<W: Write + Send + 'static> Write for CompressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(err) = self.failure.get() {
            return Err(io::Error::new(io::ErrorKind::Other, err));
        }
        let Some(jobs) = self.jobs.as_ref() else {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipeline closed"));
        };

        for part in self.chunker.split(buf) {
            if jobs.send(part).is_err() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipeline closed"));
            }
        }
        self.bytes_in += buf.len() as u64;
        Ok(buf.len())
    }

    /// Parts are dispatched as soon as they are written; flushing the
    /// underlying sink happens at `finish`.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
