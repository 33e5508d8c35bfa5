use kurbo::Size;
use log::warn;

use crate::config::HeroConfig;

/// Geometry snapshot taken once when the hero binding is built.
///
/// Precondition: the first icon must already have its natural rendered
/// size when this is measured. A hidden or zero-width icon yields no
/// usable scale factor; the layout then keeps the cluster at scale 1.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroLayout {
    pub viewport: Size,
    pub icon_count: usize,
    pub segment_count: usize,
    /// Fixed on-screen size of each clone, and the size the cluster shrinks toward.
    pub target_icon_size: f64,
    pub exact_scale: f64,
    pub container_rise: f64,
    pub header_rise: f64,
    pub dark_background: String,
    pub light_background: String,
}

impl HeroLayout {
    pub fn measure(
        config: &HeroConfig,
        viewport: Size,
        natural_icon_width: f64,
        icon_count: usize,
        segment_count: usize,
    ) -> Self {
        let target_icon_size = config.target_icon_size(viewport.width);
        let exact_scale = exact_scale(target_icon_size, natural_icon_width).unwrap_or_else(|| {
            warn!(
                "icon natural width {} is unusable, hero cluster will not scale",
                natural_icon_width
            );
            1.0
        });

        HeroLayout {
            viewport,
            icon_count,
            segment_count,
            target_icon_size,
            exact_scale,
            container_rise: config.container_rise,
            header_rise: config.header_rise,
            dark_background: config.dark_background.clone(),
            light_background: config.light_background.clone(),
        }
    }

    /// Container's vertical offset at the end of the intro phase (negative is up).
    pub fn base_y(&self) -> f64 {
        -self.viewport.height * self.container_rise
    }
}

/// Ratio between the target icon size and an icon's natural width.
pub fn exact_scale(target_size: f64, natural_width: f64) -> Option<f64> {
    if !natural_width.is_finite() || natural_width <= 0.0 || !target_size.is_finite() {
        return None;
    }
    Some(target_size / natural_width)
}
