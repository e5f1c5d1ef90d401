//! Per-frame background compositing decisions for a real-time 3D viewport.
//!
//! Each frame the engine runs one synchronous pass that ties the
//! cross-process texture link into the background decision:
//!
//! ```text
//!   LinkChannel::poll ──▶ LinkTextures::apply ──▶ SlotCursor ──▶ fence wait
//!                                                      │
//!   ViewportContext ────────▶ resolve() ◀──────────────┘
//!                                │
//!                                ▼
//!                            FramePlan ──▶ composite pass builder
//! ```
//!
//! [`resolve`] is a pure, ordered rule table mapping the viewport context to
//! a background mode, optional color override, and blend state. The
//! [`engine::BackgroundEngine`] wires it to the `glasslink` consumer and
//! emits a [`plan::FramePlan`] for the external pass builder. No call in
//! this crate blocks or aborts a frame.

pub mod context;
pub mod engine;
pub mod plan;
pub mod resolve;
pub mod settings;

pub use context::{
    ClipBounds, EditorSpace, ShadingBackground, ShadingMode, ThemeBackground, ViewportContext,
};
pub use engine::BackgroundEngine;
pub use plan::{ClipBoundDraw, FillDraw, FramePlan};
pub use resolve::{resolve, BackgroundDecision, BackgroundMode, BlendState};
pub use settings::{BackdropSettings, LinkSettings, SettingsError, ThemeSettings};
