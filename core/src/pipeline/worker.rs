//! Compression workers: drain the job queue, shrink chunks, feed the result
//! queue.

use std::sync::Arc;

use crossbeam::channel::{Receiver, Sender};
use log::{debug, trace};

use crate::codec::{Codec, CodecError};
use crate::pipeline::failure::FailureCell;
use crate::pipeline::io::CountingWriter;
use crate::pipeline::part::Part;
use crate::types::PipelineError;

fn shrink_part(codec: &dyn Codec, part: &Part) -> Result<(Vec<u8>, u64), CodecError> {
    let mut out = Vec::with_capacity(part.input.len() / 2 + 64);
    let mut sink = CountingWriter::new(&mut out);
    codec.shrink(&part.input, &mut sink)?;
    let emitted = sink.bytes_written();
    Ok((out, emitted))
}

/// Single worker loop.
///
/// A codec failure is recorded in the shared cell and the part is still
/// forwarded with empty output, so the emit stage's sequence accounting
/// never stalls; failed chunks are not retried. Each worker consumes exactly
/// one end marker, forwards it unchanged, and exits.
pub fn run_compression_worker(
    codec: Arc<dyn Codec>,
    jobs: Receiver<Part>,
    results: Sender<Part>,
    failure: FailureCell,
) {
    while let Ok(mut part) = jobs.recv() {
        if part.is_end {
            trace!("worker: got end marker {}", part.seq);
            let _ = results.send(part);
            break;
        }

        if !part.input.is_empty() {
            match shrink_part(codec.as_ref(), &part) {
                Ok((out, emitted)) => {
                    trace!(
                        "worker: shrunk part {} from {} to {emitted} bytes",
                        part.seq,
                        part.input.len()
                    );
                    part.output = out;
                }
                Err(e) => {
                    debug!("worker: shrink failed on part {}: {e}", part.seq);
                    failure.record(PipelineError::Codec(e));
                }
            }
        }

        if results.send(part).is_err() {
            break; // emit stage is gone
        }
    }
}
