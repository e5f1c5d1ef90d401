use bytemuck::Zeroable;

use crate::record::{FrameRecord, FRAME_RECORD_BYTES};
use crate::segment::{SegmentError, SharedSegment};

/// Change-detecting poll over the producer's shared frame record.
///
/// The channel lazily maps the segment (the producer may not have started
/// yet), reads the whole record every frame, and reports it only when it
/// differs from the last accepted snapshot. The mapping is scoped to the
/// channel: dropping it releases the segment on every exit path.
pub struct LinkChannel<S: SharedSegment> {
    segment: S,
    snapshot: FrameRecord,
    active: bool,
}

impl<S: SharedSegment> Drop for LinkChannel<S> {
    fn drop(&mut self) {
        self.segment.release();
    }
}

impl<S: SharedSegment> LinkChannel<S> {
    pub fn new(segment: S) -> Self {
        Self {
            segment,
            snapshot: FrameRecord::zeroed(),
            active: false,
        }
    }

    /// Returns a newly published record, or `None` when the segment is
    /// unavailable or the record is unchanged since the last acceptance.
    ///
    /// The snapshot is committed before the caller acts on the record, so a
    /// partially failed import is not re-triggered every frame. The flip
    /// side: that exact record is never retried, only a later, different
    /// publication is.
    pub fn poll(&mut self) -> Option<FrameRecord> {
        if !self.segment.is_mapped() {
            match self.segment.acquire(FRAME_RECORD_BYTES) {
                Ok(()) => {
                    self.active = true;
                    tracing::debug!("mapped link segment");
                }
                Err(SegmentError::Unavailable) => return None,
                Err(error) => {
                    tracing::debug!(error = %error, "link segment not usable yet");
                    return None;
                }
            }
        }

        let mut bytes = [0u8; FRAME_RECORD_BYTES];
        if let Err(error) = self.segment.read(&mut bytes) {
            tracing::warn!(error = %error, "failed to read link record");
            return None;
        }

        let record = FrameRecord::decode(&bytes);
        if record == self.snapshot {
            return None;
        }
        self.snapshot = record;
        Some(record)
    }

    /// Drops the mapping after a teardown. The snapshot is kept: a record
    /// republished unchanged is still ignored, while any new publication is
    /// picked up after reacquisition.
    pub fn release(&mut self) {
        self.segment.release();
        self.active = false;
    }

    /// Whether a mapping is currently held.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last accepted record.
    pub fn snapshot(&self) -> &FrameRecord {
        &self.snapshot
    }
}
