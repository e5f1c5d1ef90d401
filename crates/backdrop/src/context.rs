use serde::{Deserialize, Serialize};

/// Editor space that owns the viewport being composited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorSpace {
    View3d,
    Image,
    Node,
}

/// Where the 3D viewport shading takes its background from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingBackground {
    Theme,
    World,
    Viewport,
}

/// Viewport shading tiers, ordered from cheapest to fullest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShadingMode {
    Wireframe,
    Solid,
    Material,
    Rendered,
}

/// The user's theme preference for the 3D viewport background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeBackground {
    SingleColor,
    LinearGradient,
    RadialGradient,
}

/// Eight corners of the scene's clipping volume, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipBounds(pub [[f32; 3]; 8]);

/// Per-frame snapshot of everything the background decision reads.
///
/// Built fresh by the caller each frame from viewport, scene, and theme
/// state. `link_texture` is overwritten by the engine from this frame's slot
/// selection before the decision runs; only callers invoking the resolver
/// directly fill it themselves.
#[derive(Clone, Debug)]
pub struct ViewportContext {
    pub space: EditorSpace,
    /// The output is an image-only render, no interactive session attached.
    pub is_image_render: bool,
    /// Global background-drawing toggle.
    pub draw_background: bool,
    /// Horizon color of the active world, when one is assigned.
    pub world_horizon: Option<[f32; 3]>,
    pub shading_background: ShadingBackground,
    pub shading_mode: ShadingMode,
    /// Background color configured on the viewport shading settings.
    pub viewport_color: [f32; 3],
    pub theme_background: ThemeBackground,
    pub clip_plane_count: usize,
    pub clip_bounds: Option<ClipBounds>,
    /// Whether this frame's selected link slot holds an imported texture.
    pub link_texture: bool,
}
