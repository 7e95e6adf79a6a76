use foundation::color::{Rgba, channel_u8};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnits {
    #[default]
    Meters,
    Pixels,
}

/// Point-cloud appearance.
///
/// Points without an explicit colour get `fallback_rgb` with an alpha derived
/// from the 4th position component: `base_alpha + value * alpha_scale`,
/// rounded and clamped to a byte.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointCloudStyle {
    pub point_size: f64,
    pub size_units: SizeUnits,
    pub fallback_rgb: [u8; 3],
    pub base_alpha: f64,
    pub alpha_scale: f64,
}

impl Default for PointCloudStyle {
    fn default() -> Self {
        Self {
            point_size: 0.1,
            size_units: SizeUnits::Meters,
            fallback_rgb: [0, 255, 0],
            base_alpha: 128.0,
            alpha_scale: 1.28,
        }
    }
}

impl PointCloudStyle {
    /// A missing value maps like `0`, i.e. to `base_alpha`.
    pub fn derived_color(&self, value: Option<f64>) -> Rgba {
        let alpha = self.base_alpha + value.unwrap_or(0.0) * self.alpha_scale;
        Rgba::opaque(self.fallback_rgb).with_alpha(channel_u8(alpha).unwrap_or(0))
    }
}

/// Axis indicator drawn through the object position.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub enabled: bool,
    /// Each segment extends this far either side of the object (meters).
    pub half_length_m: f64,
    pub width_px: f64,
    pub vertical: Rgba,
    pub east_west: Rgba,
    pub north_south: Rgba,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            half_length_m: 5.0,
            width_px: 2.0,
            vertical: Rgba::RED,
            east_west: Rgba::GREEN,
            north_south: Rgba::BLUE,
        }
    }
}
