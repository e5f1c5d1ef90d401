use crate::handle::{HandleKind, PlatformHandle};
use crate::record::{FrameRecord, SLOT_COUNT};

/// Pixel format for imported link textures. The producer renders into
/// packed 11/11/10-bit three-channel float color, so every import requests
/// the same format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportFormat {
    R11g11b10Float,
}

/// Parameters handed to the GPU backend when binding an external allocation
/// as a locally owned texture.
#[derive(Clone, Copy, Debug)]
pub struct ImportRequest {
    pub label: &'static str,
    pub width: i32,
    pub height: i32,
    pub format: ImportFormat,
    pub handle: PlatformHandle,
    pub byte_size: u64,
    pub fence: PlatformHandle,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The handle no longer refers to a live allocation, e.g. the producer
    /// crashed between publishing and the import.
    #[error("texture handle {0:#x} is stale or invalid")]
    StaleHandle(u64),
    #[error("GPU backend rejected the import: {0}")]
    Backend(String),
}

/// GPU services the link consumes. The backend owns the device; textures
/// imported through it are exclusively owned by the caller until handed back
/// to [`LinkGpu::free_texture`].
pub trait LinkGpu {
    type Texture;

    /// Creates a texture bound to the external allocation described by
    /// `request`.
    fn import_texture(&mut self, request: &ImportRequest) -> Result<Self::Texture, ImportError>;

    /// Releases an imported texture. Implementations must defer the actual
    /// destruction until GPU work already submitted against the texture has
    /// retired.
    fn free_texture(&mut self, texture: Self::Texture);

    /// Blocks the GPU timeline until the producer's fence for this texture
    /// has signalled. Issued once per frame, before the texture is sampled.
    fn wait_before_sample(&mut self, texture: &Self::Texture);
}

/// Outcome of applying a newly published record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Textures were reimported; `slots` counts the ones that now hold one.
    Imported { slots: usize },
    /// The producer requested teardown; every held texture was freed and the
    /// channel mapping should be released.
    TornDown,
}

/// The set of imported link textures, one per producer slot.
pub struct LinkTextures<T> {
    slots: [Option<T>; SLOT_COUNT],
}

impl<T> Default for LinkTextures<T> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }
}

impl<T> LinkTextures<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Applies a newly accepted record: a teardown frees everything, any
    /// other record replaces each slot's texture in place. The old texture
    /// of a slot is freed before its replacement is created, so no two
    /// generations coexist. A slot whose handle the backend rejects is left
    /// empty and the remaining slots are still processed.
    pub fn apply<G>(
        &mut self,
        gpu: &mut G,
        record: &FrameRecord,
        handle_kind: HandleKind,
    ) -> ImportOutcome
    where
        G: LinkGpu<Texture = T>,
    {
        if record.is_teardown() {
            self.free_all(gpu);
            return ImportOutcome::TornDown;
        }

        for slot in 0..SLOT_COUNT {
            if let Some(previous) = self.slots[slot].take() {
                gpu.free_texture(previous);
            }

            let request = ImportRequest {
                label: "glasslink texture",
                width: record.width,
                height: record.height,
                format: ImportFormat::R11g11b10Float,
                handle: record.tex_handle(slot, handle_kind),
                byte_size: record.byte_size,
                fence: record.fence(handle_kind),
            };
            match gpu.import_texture(&request) {
                Ok(texture) => self.slots[slot] = Some(texture),
                Err(error) => {
                    tracing::warn!(
                        slot,
                        error = %error,
                        "failed to import link texture; slot left empty"
                    );
                }
            }
        }

        let slots = self.slots.iter().filter(|slot| slot.is_some()).count();
        tracing::debug!(
            slots,
            width = record.width,
            height = record.height,
            "imported link textures"
        );
        ImportOutcome::Imported { slots }
    }

    /// Frees every held texture and clears the set.
    pub fn free_all<G>(&mut self, gpu: &mut G)
    where
        G: LinkGpu<Texture = T>,
    {
        for slot in &mut self.slots {
            if let Some(texture) = slot.take() {
                gpu.free_texture(texture);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use bytemuck::Zeroable;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct FakeTexture {
        id: u64,
        handle: u64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum GpuOp {
        Import { handle: u64 },
        Free { id: u64 },
    }

    #[derive(Default)]
    struct FakeGpu {
        ops: Vec<GpuOp>,
        next_id: u64,
        rejected: HashSet<u64>,
    }

    impl LinkGpu for FakeGpu {
        type Texture = FakeTexture;

        fn import_texture(&mut self, request: &ImportRequest) -> Result<FakeTexture, ImportError> {
            let handle = request.handle.raw();
            if self.rejected.contains(&handle) {
                return Err(ImportError::StaleHandle(handle));
            }
            self.ops.push(GpuOp::Import { handle });
            self.next_id += 1;
            Ok(FakeTexture {
                id: self.next_id,
                handle,
            })
        }

        fn free_texture(&mut self, texture: FakeTexture) {
            self.ops.push(GpuOp::Free { id: texture.id });
        }

        fn wait_before_sample(&mut self, _texture: &FakeTexture) {}
    }

    fn record(handles: [u64; SLOT_COUNT]) -> FrameRecord {
        FrameRecord {
            tex_handles: handles,
            fence_handle: 0xfe,
            byte_size: 2048,
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn first_record_fills_all_three_slots() {
        let mut gpu = FakeGpu::default();
        let mut textures = LinkTextures::new();

        let outcome = textures.apply(&mut gpu, &record([1, 2, 3]), HandleKind::OpaqueFd);

        assert_eq!(outcome, ImportOutcome::Imported { slots: 3 });
        assert!(!textures.is_empty());
        for slot in 0..SLOT_COUNT {
            let texture = textures.slot(slot).expect("slot filled");
            assert_eq!(texture.handle, (slot as u64) + 1);
        }
        assert!(gpu.ops.iter().all(|op| matches!(op, GpuOp::Import { .. })));
    }

    #[test]
    fn replacement_frees_the_old_generation_first() {
        let mut gpu = FakeGpu::default();
        let mut textures = LinkTextures::new();
        textures.apply(&mut gpu, &record([1, 2, 3]), HandleKind::OpaqueFd);
        gpu.ops.clear();

        textures.apply(&mut gpu, &record([4, 5, 6]), HandleKind::OpaqueFd);

        // Per slot: free of the old texture strictly precedes the import of
        // its replacement.
        assert_eq!(
            gpu.ops,
            vec![
                GpuOp::Free { id: 1 },
                GpuOp::Import { handle: 4 },
                GpuOp::Free { id: 2 },
                GpuOp::Import { handle: 5 },
                GpuOp::Free { id: 3 },
                GpuOp::Import { handle: 6 },
            ]
        );
        assert_eq!(textures.slot(0).expect("slot 0").handle, 4);
    }

    #[test]
    fn teardown_frees_everything_and_empties_the_set() {
        let mut gpu = FakeGpu::default();
        let mut textures = LinkTextures::new();
        textures.apply(&mut gpu, &record([1, 2, 3]), HandleKind::OpaqueFd);
        gpu.ops.clear();

        let outcome = textures.apply(&mut gpu, &record([0, 2, 3]), HandleKind::OpaqueFd);

        assert_eq!(outcome, ImportOutcome::TornDown);
        assert!(textures.is_empty());
        assert_eq!(gpu.ops.len(), SLOT_COUNT);
        assert!(gpu.ops.iter().all(|op| matches!(op, GpuOp::Free { .. })));
    }

    #[test]
    fn teardown_with_nothing_held_is_a_noop() {
        let mut gpu = FakeGpu::default();
        let mut textures: LinkTextures<FakeTexture> = LinkTextures::new();

        let outcome = textures.apply(&mut gpu, &FrameRecord::zeroed(), HandleKind::OpaqueFd);

        assert_eq!(outcome, ImportOutcome::TornDown);
        assert!(gpu.ops.is_empty());
    }

    #[test]
    fn rejected_handle_leaves_only_that_slot_empty() {
        let mut gpu = FakeGpu::default();
        gpu.rejected.insert(2);
        let mut textures = LinkTextures::new();

        let outcome = textures.apply(&mut gpu, &record([1, 2, 3]), HandleKind::OpaqueFd);

        assert_eq!(outcome, ImportOutcome::Imported { slots: 2 });
        assert!(textures.slot(0).is_some());
        assert!(textures.slot(1).is_none());
        assert!(textures.slot(2).is_some());
    }
}
