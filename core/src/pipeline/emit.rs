//! Reorder/emit stage: restores sequence order and writes the output stream.

use std::collections::BTreeMap;
use std::io::Write;

use crossbeam::channel::Receiver;
use log::{debug, trace};

use crate::pipeline::failure::FailureCell;
use crate::pipeline::part::Part;
use crate::types::PipelineError;

/// Block until the part numbered `next` is available, buffering any parts
/// that complete ahead of their turn. Every key in `pending` stays strictly
/// greater than `next`. Returns `None` if the result queue disconnects
/// first.
fn next_in_sequence(
    next: u64,
    results: &Receiver<Part>,
    pending: &mut BTreeMap<u64, Part>,
) -> Option<Part> {
    if let Some(part) = pending.remove(&next) {
        return Some(part);
    }
    loop {
        let part = results.recv().ok()?;
        if part.seq == next {
            return Some(part);
        }
        trace!(
            "emit: part {} ahead of {next}, buffering ({} pending)",
            part.seq,
            pending.len()
        );
        pending.insert(part.seq, part);
    }
}

/// Emit completed parts to `out` strictly in sequence order; returns the
/// number of parts written.
///
/// The loop ends at the first end marker reached by the sequence counter.
/// Markers always carry numbers past every real part, so no real data can
/// be skipped; surplus markers with larger numbers are simply never reached.
/// A sink error is recorded as fatal, after which the stage keeps draining
/// without writing so every worker can still retire its marker.
pub fn run_emit<W: Write>(out: &mut W, results: &Receiver<Part>, failure: &FailureCell) -> u64 {
    let mut pending = BTreeMap::new();
    let mut next = 0u64;
    let mut written = 0u64;
    let mut sink_dead = false;

    loop {
        let Some(part) = next_in_sequence(next, results, &mut pending) else {
            failure.record(PipelineError::Disconnected(
                "result queue closed before the end marker",
            ));
            break;
        };

        trace!(
            "emit: part {} with {} output bytes, end={}",
            part.seq,
            part.output.len(),
            part.is_end
        );

        if !sink_dead && !part.output.is_empty() {
            if let Err(e) = out.write_all(&part.output) {
                debug!("emit: output write failed: {e}");
                failure.record(PipelineError::output(&e));
                sink_dead = true;
            } else {
                written += 1;
            }
        }

        next += 1;
        if part.is_end {
            debug!("emit: reached end marker {}", part.seq);
            break;
        }
    }

    written
}
