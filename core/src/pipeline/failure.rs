use std::sync::{Arc, OnceLock};

use crate::types::PipelineError;

/// Single-slot holder of the first error observed anywhere in the pipeline.
///
/// Any worker or stage may race through `record`; the first write wins and
/// later errors are discarded, not queued. Reads happen only at defined
/// synchronization points — the push writer's fail-fast check and the single
/// authoritative read when the stream is finished.
#[derive(Debug, Clone, Default)]
pub struct FailureCell {
    slot: Arc<OnceLock<PipelineError>>,
}

impl FailureCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `err` unless an earlier error already holds the slot.
    /// Returns whether this call won.
    pub fn record(&self, err: PipelineError) -> bool {
        self.slot.set(err).is_ok()
    }

    pub fn get(&self) -> Option<PipelineError> {
        self.slot.get().cloned()
    }

    /// Ok iff no failure has been recorded.
    pub fn check(&self) -> Result<(), PipelineError> {
        match self.slot.get() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
