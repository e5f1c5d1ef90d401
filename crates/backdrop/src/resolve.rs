use crate::context::{
    EditorSpace, ShadingBackground, ShadingMode, ThemeBackground, ViewportContext,
};

/// How the background fill pass shades itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundMode {
    Solid,
    SolidChecker,
    Mask,
    Checker,
    Gradient,
    Radial,
    GlassLink,
}

/// Blend state for the fill draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendState {
    /// Dedicated background blend, the default for every mode.
    Background,
    /// Multiply blend, used by the node editor's mask backdrop.
    Multiply,
}

/// Resolved background for one frame. Recomputed from the context every
/// frame, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundDecision {
    pub mode: BackgroundMode,
    pub color_override: Option<[f32; 4]>,
    pub blend: BlendState,
}

/// One entry of the ordered decision table. The first rule whose predicate
/// matches decides the frame; when none does, the theme preference decides.
struct Rule {
    name: &'static str,
    applies: fn(&ViewportContext) -> bool,
    decide: fn(&ViewportContext) -> BackgroundDecision,
}

fn solid(color_override: Option<[f32; 4]>) -> BackgroundDecision {
    BackgroundDecision {
        mode: BackgroundMode::Solid,
        color_override,
        blend: BlendState::Background,
    }
}

const RULES: &[Rule] = &[
    Rule {
        // Image-only renders with compositing disabled want a clean alpha
        // channel, so force opaque transparent black.
        name: "image_render_alpha",
        applies: |ctx| ctx.is_image_render && !ctx.draw_background,
        decide: |_| solid(Some([0.0, 0.0, 0.0, 1.0])),
    },
    Rule {
        name: "image_editor",
        applies: |ctx| ctx.space == EditorSpace::Image,
        decide: |_| BackgroundDecision {
            mode: BackgroundMode::SolidChecker,
            color_override: None,
            blend: BlendState::Background,
        },
    },
    Rule {
        name: "node_editor",
        applies: |ctx| ctx.space == EditorSpace::Node,
        decide: |_| BackgroundDecision {
            mode: BackgroundMode::Mask,
            color_override: None,
            blend: BlendState::Multiply,
        },
    },
    Rule {
        name: "background_disabled",
        applies: |ctx| !ctx.draw_background,
        decide: |_| BackgroundDecision {
            mode: BackgroundMode::Checker,
            color_override: None,
            blend: BlendState::Background,
        },
    },
    Rule {
        name: "world_horizon",
        applies: |ctx| {
            ctx.shading_background == ShadingBackground::World && ctx.world_horizon.is_some()
        },
        decide: |ctx| {
            // TODO: this is a scene-referred linear color; convert it to
            // display linear before overriding.
            let [r, g, b] = ctx.world_horizon.unwrap_or([0.0; 3]);
            solid(Some([r, g, b, 1.0]))
        },
    },
    Rule {
        name: "viewport_color",
        applies: |ctx| {
            ctx.shading_background == ShadingBackground::Viewport
                && ctx.shading_mode <= ShadingMode::Solid
        },
        decide: |ctx| {
            let [r, g, b] = ctx.viewport_color;
            solid(Some([r, g, b, 1.0]))
        },
    },
];

/// Picks this frame's background from the viewport context.
///
/// Pure: no side effects, no retained state. The table is evaluated
/// top-down and the rules are mutually exclusive by construction; the
/// fall-through consults the user's theme preference, where a single-color
/// theme upgrades to the link texture whenever one is ready this frame.
pub fn resolve(ctx: &ViewportContext) -> BackgroundDecision {
    for rule in RULES {
        if (rule.applies)(ctx) {
            tracing::trace!(rule = rule.name, "background rule matched");
            return (rule.decide)(ctx);
        }
    }
    theme_preference(ctx)
}

fn theme_preference(ctx: &ViewportContext) -> BackgroundDecision {
    let mode = match ctx.theme_background {
        ThemeBackground::LinearGradient => BackgroundMode::Gradient,
        ThemeBackground::RadialGradient => BackgroundMode::Radial,
        ThemeBackground::SingleColor if ctx.link_texture => BackgroundMode::GlassLink,
        ThemeBackground::SingleColor => BackgroundMode::Solid,
    };
    BackgroundDecision {
        mode,
        color_override: None,
        blend: BlendState::Background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ctx() -> ViewportContext {
        ViewportContext {
            space: EditorSpace::View3d,
            is_image_render: false,
            draw_background: true,
            world_horizon: None,
            shading_background: ShadingBackground::Theme,
            shading_mode: ShadingMode::Material,
            viewport_color: [0.2, 0.2, 0.2],
            theme_background: ThemeBackground::SingleColor,
            clip_plane_count: 0,
            clip_bounds: None,
            link_texture: false,
        }
    }

    #[test]
    fn image_render_override_beats_every_other_field() {
        // Deliberately contradictory context: every later rule would also
        // like to match.
        let ctx = ViewportContext {
            is_image_render: true,
            draw_background: false,
            space: EditorSpace::Node,
            world_horizon: Some([0.9, 0.1, 0.1]),
            theme_background: ThemeBackground::RadialGradient,
            link_texture: true,
            ..base_ctx()
        };

        let decision = resolve(&ctx);
        assert_eq!(decision.mode, BackgroundMode::Solid);
        assert_eq!(decision.color_override, Some([0.0, 0.0, 0.0, 1.0]));
        assert_eq!(decision.blend, BlendState::Background);
    }

    #[test]
    fn image_editor_gets_the_solid_checker() {
        let ctx = ViewportContext {
            space: EditorSpace::Image,
            ..base_ctx()
        };
        let decision = resolve(&ctx);
        assert_eq!(decision.mode, BackgroundMode::SolidChecker);
        assert_eq!(decision.color_override, None);
    }

    #[test]
    fn node_editor_always_masks_with_multiply_blend() {
        for link_texture in [false, true] {
            for theme in [
                ThemeBackground::SingleColor,
                ThemeBackground::LinearGradient,
                ThemeBackground::RadialGradient,
            ] {
                let ctx = ViewportContext {
                    space: EditorSpace::Node,
                    theme_background: theme,
                    link_texture,
                    ..base_ctx()
                };
                let decision = resolve(&ctx);
                assert_eq!(decision.mode, BackgroundMode::Mask);
                assert_eq!(decision.blend, BlendState::Multiply);
                assert_eq!(decision.color_override, None);
            }
        }
    }

    #[test]
    fn disabled_background_falls_back_to_checker() {
        let ctx = ViewportContext {
            draw_background: false,
            ..base_ctx()
        };
        assert_eq!(resolve(&ctx).mode, BackgroundMode::Checker);
    }

    #[test]
    fn world_horizon_color_is_used_when_a_world_is_assigned() {
        let ctx = ViewportContext {
            shading_background: ShadingBackground::World,
            world_horizon: Some([0.1, 0.4, 0.7]),
            ..base_ctx()
        };
        let decision = resolve(&ctx);
        assert_eq!(decision.mode, BackgroundMode::Solid);
        assert_eq!(decision.color_override, Some([0.1, 0.4, 0.7, 1.0]));
    }

    #[test]
    fn world_background_without_a_world_falls_through_to_theme() {
        let ctx = ViewportContext {
            shading_background: ShadingBackground::World,
            world_horizon: None,
            theme_background: ThemeBackground::LinearGradient,
            ..base_ctx()
        };
        assert_eq!(resolve(&ctx).mode, BackgroundMode::Gradient);
    }

    #[test]
    fn viewport_color_applies_only_up_to_the_solid_tier() {
        let solid_tier = ViewportContext {
            shading_background: ShadingBackground::Viewport,
            shading_mode: ShadingMode::Solid,
            viewport_color: [0.3, 0.2, 0.1],
            ..base_ctx()
        };
        let decision = resolve(&solid_tier);
        assert_eq!(decision.mode, BackgroundMode::Solid);
        assert_eq!(decision.color_override, Some([0.3, 0.2, 0.1, 1.0]));

        let material_tier = ViewportContext {
            shading_mode: ShadingMode::Material,
            ..solid_tier
        };
        assert_eq!(resolve(&material_tier).color_override, None);
    }

    #[test]
    fn theme_gradients_map_to_their_modes() {
        let linear = ViewportContext {
            theme_background: ThemeBackground::LinearGradient,
            ..base_ctx()
        };
        assert_eq!(resolve(&linear).mode, BackgroundMode::Gradient);

        let radial = ViewportContext {
            theme_background: ThemeBackground::RadialGradient,
            link_texture: true,
            ..base_ctx()
        };
        assert_eq!(resolve(&radial).mode, BackgroundMode::Radial);
    }

    #[test]
    fn single_color_theme_gates_on_the_link_texture() {
        let with_link = ViewportContext {
            link_texture: true,
            ..base_ctx()
        };
        let decision = resolve(&with_link);
        assert_eq!(decision.mode, BackgroundMode::GlassLink);
        assert_eq!(decision.color_override, None);

        let without_link = base_ctx();
        let decision = resolve(&without_link);
        assert_eq!(decision.mode, BackgroundMode::Solid);
        assert_eq!(decision.color_override, None);
    }
}
