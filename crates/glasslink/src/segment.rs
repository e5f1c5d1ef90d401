#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// The producer has not created the named segment yet. Expected during
    /// startup and after teardown; the channel polls again next frame.
    #[error("shared segment does not exist yet")]
    Unavailable,
    #[error("shared segment is not mapped")]
    NotMapped,
    #[error("shared segment holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Consumer-side view of the named shared-memory segment the producer
/// publishes frame records into.
///
/// Implementations own the platform mapping for a well-known, process-wide
/// segment name; the channel only ever touches it through these four calls,
/// which lets tests substitute scripted fakes.
pub trait SharedSegment {
    /// Maps the segment, expecting exactly `byte_len` bytes.
    fn acquire(&mut self, byte_len: usize) -> Result<(), SegmentError>;

    fn is_mapped(&self) -> bool;

    /// Copies the full record out of the mapping into `buf`. The read is not
    /// synchronized against the producer; callers tolerate torn records.
    fn read(&self, buf: &mut [u8]) -> Result<(), SegmentError>;

    /// Unmaps the segment. Safe to call when nothing is mapped.
    fn release(&mut self);
}
