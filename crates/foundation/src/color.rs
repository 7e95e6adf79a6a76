use serde::{Deserialize, Deserializer, Serialize};

/// 8-bit RGBA colour as consumed by the layer host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "[u8; 4]")]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const RED: Rgba = Rgba([255, 0, 0, 255]);
    pub const GREEN: Rgba = Rgba([0, 255, 0, 255]);
    pub const BLUE: Rgba = Rgba([0, 0, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self([rgb[0], rgb[1], rgb[2], 255])
    }

    pub fn with_alpha(self, a: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    /// Builds a colour from loosely typed channel values.
    ///
    /// Accepts 3 (alpha defaults to 255) or 4 channels; values are rounded and
    /// clamped to 0..=255. Non-finite channels make the whole colour invalid.
    pub fn from_channels(channels: &[f64]) -> Option<Self> {
        if channels.len() != 3 && channels.len() != 4 {
            return None;
        }
        let mut out = [255u8; 4];
        for (slot, v) in out.iter_mut().zip(channels) {
            *slot = channel_u8(*v)?;
        }
        Some(Self(out))
    }
}

/// Rounds and clamps a channel value to a byte.
pub fn channel_u8(v: f64) -> Option<u8> {
    if !v.is_finite() {
        return None;
    }
    Some(v.round().clamp(0.0, 255.0) as u8)
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        c.0
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let channels = Vec::<f64>::deserialize(deserializer)?;
        Rgba::from_channels(&channels)
            .ok_or_else(|| serde::de::Error::custom("expected 3 or 4 finite colour channels"))
    }
}
