use bytemuck::{Pod, Zeroable};

use crate::handle::{HandleKind, PlatformHandle};

/// Number of rotating texture slots the producer publishes.
pub const SLOT_COUNT: usize = 3;

/// Size in bytes of the shared wire record.
pub const FRAME_RECORD_BYTES: usize = std::mem::size_of::<FrameRecord>();

/// Fixed-layout record the producer republishes on every change.
///
/// There is no version field; both sides agree on this layout out-of-band.
/// The record is compared whole: any single-bit difference, including in
/// fields irrelevant to texture identity such as the dimensions, counts as a
/// new publication and triggers a full re-import downstream.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FrameRecord {
    /// Opaque payloads of the three rotating texture handles.
    pub tex_handles: [u64; SLOT_COUNT],
    /// Opaque payload of the fence signalled after the most recent write.
    pub fence_handle: u64,
    /// Backing allocation size shared by all three textures.
    pub byte_size: u64,
    pub width: i32,
    pub height: i32,
}

impl FrameRecord {
    /// Copies a record out of a mapped byte buffer. The returned value is
    /// owned and never aliases the mapping.
    pub fn decode(bytes: &[u8; FRAME_RECORD_BYTES]) -> Self {
        bytemuck::pod_read_unaligned(bytes)
    }

    /// The producer zeroes the first handle (or the byte size) to ask the
    /// consumer to drop every imported texture and release the mapping.
    pub fn is_teardown(&self) -> bool {
        self.tex_handles[0] == 0 || self.byte_size == 0
    }

    /// Tags the texture handle payload for `slot` with the configured
    /// platform flavor.
    pub fn tex_handle(&self, slot: usize, kind: HandleKind) -> PlatformHandle {
        PlatformHandle::new(kind, self.tex_handles[slot])
    }

    /// Tags the fence payload with the configured platform flavor.
    pub fn fence(&self, kind: HandleKind) -> PlatformHandle {
        PlatformHandle::new(kind, self.fence_handle)
    }
}
