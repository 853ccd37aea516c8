use bytes::Bytes;

/// Unit of work flowing through the pipeline: either one chunk of input
/// (plus, once compressed, its output block) or an end-of-stream marker.
///
/// Ownership moves linearly — chunker, job queue, one worker, result queue,
/// emit stage — so no part is ever shared between threads, and `output` is
/// never touched again after the worker populates it.
#[derive(Debug)]
pub struct Part {
    /// Assigned only by the chunker, strictly increasing per stream.
    pub seq: u64,
    pub input: Bytes,
    pub output: Vec<u8>,
    pub is_end: bool,
}

impl Part {
    pub fn data(seq: u64, input: Bytes) -> Self {
        Part {
            seq,
            input,
            output: Vec::new(),
            is_end: false,
        }
    }

    /// Marker releasing one worker. Marker sequence numbers always sort
    /// after every real part, so the emit stage cannot reach one while real
    /// data is still undelivered.
    pub fn end_marker(seq: u64) -> Self {
        Part {
            seq,
            input: Bytes::new(),
            output: Vec::new(),
            is_end: true,
        }
    }
}
