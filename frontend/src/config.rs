use log::warn;
use serde::Deserialize;

/// Id of the optional `<script type="application/json">` block overriding the defaults.
pub const CONFIG_SCRIPT_ID: &str = "hero-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Viewports at most this wide get the narrow icon size.
    pub narrow_breakpoint: f64,
    pub narrow_icon_size: f64,
    pub wide_icon_size: f64,
    /// Length of the pinned hero scroll, in viewport heights.
    pub pin_viewports: f64,
    pub container_rise: f64,
    pub header_rise: f64,
    pub dark_background: String,
    pub light_background: String,
    pub scrub_seconds: f64,
    /// Fixed text reveal seed; a fresh one is drawn per session when unset.
    pub reveal_seed: Option<u64>,
    /// Explicit reveal rank per text segment, used when it is a permutation of the page's segments.
    pub reveal_order: Option<Vec<usize>>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig {
            narrow_breakpoint: 1000.0,
            narrow_icon_size: 30.0,
            wide_icon_size: 60.0,
            pin_viewports: 8.0,
            container_rise: 0.3,
            header_rise: 50.0,
            dark_background: "#141414".to_string(),
            light_background: "#e3e3db".to_string(),
            scrub_seconds: 1.0,
            reveal_seed: None,
            reveal_order: None,
        }
    }
}

impl HeroConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parses an override block, keeping the defaults if it is malformed.
    pub fn from_json_or_default(raw: &str) -> Self {
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed hero config: {}", e);
                HeroConfig::default()
            }
        }
    }

    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width <= self.narrow_breakpoint
    }

    pub fn target_icon_size(&self, viewport_width: f64) -> f64 {
        if self.is_narrow(viewport_width) {
            self.narrow_icon_size
        } else {
            self.wide_icon_size
        }
    }
}
