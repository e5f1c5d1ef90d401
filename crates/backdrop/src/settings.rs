use glasslink::HandleKind;
use serde::{Deserialize, Serialize};

use crate::context::ThemeBackground;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Well-known segment name both processes default to for the frame record.
pub const DEFAULT_SEGMENT_NAME: &str = "glasslink-frames";

/// Background and link configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackdropSettings {
    #[serde(default)]
    pub link: LinkSettings,
    #[serde(default)]
    pub theme: ThemeSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkSettings {
    /// Polling can be switched off entirely; the background then always
    /// falls through the normal mode table.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Name of the process-wide shared segment the producer publishes into.
    #[serde(default = "default_segment")]
    pub segment: String,
    /// Platform flavor of the handle payloads in the record; agreed with
    /// the producer out-of-band.
    #[serde(default = "default_handle_kind")]
    pub handle_kind: HandleKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeSettings {
    /// The user's background style preference for the 3D viewport.
    #[serde(default = "default_background")]
    pub background: ThemeBackground,
    /// RGBA border color of the clip-boundary draw.
    #[serde(default = "default_clipping_border")]
    pub clipping_border: [f32; 4],
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            segment: default_segment(),
            handle_kind: default_handle_kind(),
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background: default_background(),
            clipping_border: default_clipping_border(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_segment() -> String {
    DEFAULT_SEGMENT_NAME.to_string()
}

fn default_handle_kind() -> HandleKind {
    if cfg!(windows) {
        HandleKind::OpaqueWin32
    } else {
        HandleKind::OpaqueFd
    }
}

fn default_background() -> ThemeBackground {
    ThemeBackground::SingleColor
}

fn default_clipping_border() -> [f32; 4] {
    [0.25, 0.25, 0.25, 1.0]
}

impl BackdropSettings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        let settings: BackdropSettings = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.link.segment.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "link segment name must not be empty".to_string(),
            ));
        }
        for component in self.theme.clipping_border {
            if !component.is_finite() || !(0.0..=1.0).contains(&component) {
                return Err(SettingsError::Invalid(format!(
                    "clipping border component {component} is outside 0..=1"
                )));
            }
        }
        Ok(())
    }
}
