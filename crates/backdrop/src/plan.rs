use crate::context::ClipBounds;
use crate::resolve::{BackgroundDecision, BackgroundMode, BlendState};

/// Clip-boundary draw emitted ahead of the fill whenever the scene has
/// active clipping planes and a bounding box, independent of the resolved
/// background mode. Drawn with alpha blending and back-face culling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipBoundDraw {
    pub bounds: ClipBounds,
    /// Theme's clipping-border color.
    pub color: [f32; 4],
}

/// The background fill: one full-screen triangle shaded by `mode`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillDraw {
    pub mode: BackgroundMode,
    pub blend: BlendState,
    pub color_override: Option<[f32; 4]>,
    /// Link slot whose imported texture should be bound for sampling. Only
    /// set when the slot holds a texture whose fence was waited on this
    /// frame.
    pub link_slot: Option<usize>,
}

impl FillDraw {
    pub(crate) fn new(decision: BackgroundDecision, link_slot: Option<usize>) -> Self {
        Self {
            mode: decision.mode,
            blend: decision.blend,
            color_override: decision.color_override,
            link_slot,
        }
    }
}

/// Everything the external composite pass builder needs for one frame, in
/// draw order: the optional clip boundary first, then the fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    pub clip_bound: Option<ClipBoundDraw>,
    pub fill: FillDraw,
}
