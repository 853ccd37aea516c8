//! Input chunking: assigns sequence numbers and feeds the job queue.

use std::io::Read;

use bytes::Bytes;
use crossbeam::channel::Sender;
use log::{debug, trace};

use crate::pipeline::failure::FailureCell;
use crate::pipeline::io::read_exact_or_eof;
use crate::pipeline::part::Part;
use crate::types::PipelineError;

/// Owns the stream's sequence counter. Every `Part` — real chunk or end
/// marker — gets its number here and nowhere else.
#[derive(Debug)]
pub struct Chunker {
    chunk_size: usize,
    next_seq: u64,
}

impl Chunker {
    pub fn new(chunk_size: usize) -> Self {
        Chunker {
            chunk_size: chunk_size.max(1),
            next_seq: 0,
        }
    }

    fn next_part(&mut self, input: Bytes) -> Part {
        let part = Part::data(self.next_seq, input);
        self.next_seq += 1;
        part
    }

    /// Split a caller-supplied buffer into chunk-size parts (push entry
    /// path). Continues the same sequence counter as the pull path.
    pub fn split(&mut self, data: &[u8]) -> Vec<Part> {
        let size = self.chunk_size;
        data.chunks(size)
            .map(|chunk| self.next_part(Bytes::copy_from_slice(chunk)))
            .collect()
    }

    /// Exactly `count` markers with strictly increasing sequence numbers,
    /// all numbered past every real part produced so far.
    pub fn end_markers(&mut self, count: usize) -> Vec<Part> {
        (0..count)
            .map(|_| {
                let marker = Part::end_marker(self.next_seq);
                self.next_seq += 1;
                marker
            })
            .collect()
    }
}

/// Pull-style chunker loop: fill chunks of exactly `chunk_size` bytes until
/// end-of-input, then release every worker with one end marker each.
///
/// A genuine read error is recorded as fatal, but the markers are still sent
/// so the pool drains and shuts down instead of hanging on the bounded
/// queues. Returns (bytes read, real parts produced).
pub fn run_chunker<R: Read>(
    mut input: R,
    chunker: &mut Chunker,
    jobs: &Sender<Part>,
    pool_size: usize,
    failure: &FailureCell,
) -> (u64, u64) {
    let mut bytes_in = 0u64;
    let mut parts = 0u64;

    loop {
        match read_exact_or_eof(&mut input, chunker.chunk_size) {
            Ok(buf) if buf.is_empty() => break,
            Ok(buf) => {
                bytes_in += buf.len() as u64;
                let part = chunker.next_part(buf);
                trace!("chunker: read {} bytes into part {}", part.input.len(), part.seq);
                if jobs.send(part).is_err() {
                    // Pool is gone; whatever killed it has already recorded.
                    return (bytes_in, parts);
                }
                parts += 1;
            }
            Err(e) => {
                debug!("chunker: input read failed: {e}");
                failure.record(PipelineError::input(&e));
                break;
            }
        }
    }

    debug!("chunker: end of input after {parts} parts, releasing {pool_size} workers");
    for marker in chunker.end_markers(pool_size) {
        if jobs.send(marker).is_err() {
            break;
        }
    }

    (bytes_in, parts)
}
