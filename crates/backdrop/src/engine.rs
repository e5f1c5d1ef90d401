use glasslink::{
    HandleKind, ImportOutcome, LinkChannel, LinkGpu, LinkTextures, SharedSegment, SlotCursor,
};

use crate::context::ViewportContext;
use crate::plan::{ClipBoundDraw, FillDraw, FramePlan};
use crate::resolve;
use crate::settings::BackdropSettings;

/// Per-frame background orchestration. One instance lives for the process
/// lifetime, on the thread that owns the GPU context; everything it does is
/// synchronous and non-blocking.
pub struct BackgroundEngine<S: SharedSegment, T> {
    channel: LinkChannel<S>,
    textures: LinkTextures<T>,
    cursor: SlotCursor,
    handle_kind: HandleKind,
    clip_border_color: [f32; 4],
    link_enabled: bool,
}

impl<S: SharedSegment, T> BackgroundEngine<S, T> {
    /// The segment must be constructed for the well-known name configured
    /// in `settings.link.segment`; the engine only drives its lifecycle.
    pub fn new(segment: S, settings: &BackdropSettings) -> Self {
        Self {
            channel: LinkChannel::new(segment),
            textures: LinkTextures::new(),
            cursor: SlotCursor::new(),
            handle_kind: settings.link.handle_kind,
            clip_border_color: settings.theme.clipping_border,
            link_enabled: settings.link.enabled,
        }
    }

    /// Runs the per-frame sequence: poll the link, import or tear down on a
    /// new record, pick this frame's slot, fence-wait its texture, resolve
    /// the background, and assemble the plan for the pass builder.
    pub fn begin_frame<G>(&mut self, gpu: &mut G, mut ctx: ViewportContext) -> FramePlan
    where
        G: LinkGpu<Texture = T>,
    {
        if self.link_enabled {
            if let Some(record) = self.channel.poll() {
                if let ImportOutcome::TornDown =
                    self.textures.apply(gpu, &record, self.handle_kind)
                {
                    self.channel.release();
                    tracing::info!("link producer went away; released segment");
                }
            }
        }

        let (slot, texture) = self.cursor.advance_and_get(&self.textures);
        // The producer signals the fence when the slot's contents are ready;
        // sampling must not be issued before this wait.
        if let Some(texture) = texture {
            gpu.wait_before_sample(texture);
        }
        let link_slot = texture.is_some().then_some(slot);

        ctx.link_texture = link_slot.is_some();
        let decision = resolve::resolve(&ctx);

        let clip_bound = if ctx.clip_plane_count > 0 {
            ctx.clip_bounds.map(|bounds| ClipBoundDraw {
                bounds,
                color: self.clip_border_color,
            })
        } else {
            None
        };

        FramePlan {
            clip_bound,
            fill: FillDraw::new(decision, link_slot),
        }
    }

    /// Whether the link currently holds a mapped segment.
    pub fn link_active(&self) -> bool {
        self.channel.is_active()
    }

    /// Imported textures, for binding by the pass builder.
    pub fn textures(&self) -> &LinkTextures<T> {
        &self.textures
    }
}
