use serde::{Deserialize, Serialize};

/// Platform flavor of an externally shared GPU object handle.
///
/// The wire record carries raw payloads only; producer and consumer agree on
/// the flavor out-of-band (the `[link] handle_kind` setting on the consumer
/// side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// POSIX file-descriptor-backed memory object.
    OpaqueFd,
    /// Windows NT handle.
    OpaqueWin32,
}

/// Tagged, platform-agnostic wrapper around an opaque handle payload, so the
/// core logic never touches raw pointers and GPU backends can be faked in
/// tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlatformHandle {
    kind: HandleKind,
    raw: u64,
}

impl PlatformHandle {
    pub fn new(kind: HandleKind, raw: u64) -> Self {
        Self { kind, raw }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// A zero payload means "no object"; the producer zeroes the first
    /// texture handle to request teardown.
    pub fn is_null(&self) -> bool {
        self.raw == 0
    }
}
