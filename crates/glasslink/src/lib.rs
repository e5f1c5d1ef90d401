//! Consumer side of the "glasslink" cross-process GPU texture hand-off.
//!
//! An external producer renders into three rotating shared textures and
//! republishes a fixed-layout record describing them through a named
//! shared-memory segment. This crate owns the consumer half of that
//! handshake:
//!
//! ```text
//!   producer process                 compositor process
//!   ────────────────                 ──────────────────
//!   shared segment ──▶ LinkChannel::poll ──▶ LinkTextures::apply ──▶ SlotCursor
//!      (record)          (change detect)      (import / teardown)    (pick slot)
//! ```
//!
//! The raw mapping primitive and the GPU device are collaborators injected
//! through the [`SharedSegment`] and [`LinkGpu`] traits; nothing in here
//! blocks, and every failure degrades to "no update this frame".

pub mod channel;
pub mod handle;
pub mod import;
pub mod record;
pub mod segment;
pub mod slots;

pub use channel::LinkChannel;
pub use handle::{HandleKind, PlatformHandle};
pub use import::{
    ImportError, ImportFormat, ImportOutcome, ImportRequest, LinkGpu, LinkTextures,
};
pub use record::{FrameRecord, FRAME_RECORD_BYTES, SLOT_COUNT};
pub use segment::{SegmentError, SharedSegment};
pub use slots::SlotCursor;
