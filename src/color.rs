use anyhow::{bail, Result};
use palette::Srgb;

/// An sRGB color with 8-bit channels, as reported in extraction results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            bail!(
                "invalid hex color: expected 6 hex digits, got {}",
                hex.len()
            );
        }
        if !hex.is_ascii() {
            bail!("invalid hex color: non-ASCII characters in {hex:?}");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalized `[0, 1]` float components, the space the clusterer works in.
    pub fn to_srgb_f32(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    /// Build a color from real-valued channel means on the `0..=255` scale.
    ///
    /// Fractional parts are truncated toward zero, so a centroid of
    /// `(127.9, 0.5, 255.0)` becomes `#7f00ff`. Out-of-range values saturate.
    pub fn from_centroid(r: f64, g: f64, b: f64) -> Self {
        fn channel(v: f64) -> u8 {
            // `as` truncates toward zero and saturates; NaN maps to 0.
            v.clamp(0.0, 255.0) as u8
        }
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Srgb<f32>> for Color {
    /// Scales a normalized color back to `0..=255`, truncating like
    /// [`Color::from_centroid`].
    fn from(srgb: Srgb<f32>) -> Self {
        Self::from_centroid(
            f64::from(srgb.red) * 255.0,
            f64::from(srgb.green) * 255.0,
            f64::from(srgb.blue) * 255.0,
        )
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
