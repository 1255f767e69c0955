use palette::{FromColor, IntoColor, Lab, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced by color parsing and derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The input string is not a 3- or 6-digit hex color.
    #[error("invalid hex color `{0}`: expected 3 or 6 hex digits")]
    InvalidFormat(String),
    /// A numeric parameter is outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Lightness range covered by value variations, as fractions of the HSL
/// lightness scale. Endpoints stay off pure black/white so hue survives.
const VARIATION_LIGHTNESS_MIN: f32 = 0.20;
const VARIATION_LIGHTNESS_MAX: f32 = 0.80;

/// Luminance above this reads better with black text on top.
const CONTRAST_LUMINANCE_THRESHOLD: f32 = 0.5;

/// Core color type used throughout the crate.
/// Wraps sRGB u8 components and provides conversions to other color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL components rounded for display: hue in whole degrees [0,360),
/// saturation and lightness as integer percentages.
///
/// Conversions run at full precision through [`palette`]; this triple exists
/// only at the display boundary so repeated reads show stable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Format as `hsl(h, s%, l%)`.
    pub fn format(self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// All display representations of one color, derived on demand from the hex
/// source of truth. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInfo {
    /// Canonical `#RRGGBB` (uppercase).
    pub hex: String,
    pub rgb: Color,
    pub hsl: Hsl,
}

impl ColorInfo {
    /// Compose hex, RGB, and HSL views of a hex color string.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let color = Color::from_hex(hex)?;
        Ok(Self {
            hex: color.format_hex(),
            rgb: color,
            hsl: color.hsl(),
        })
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `FF8800`, or the 3-digit
    /// shorthand `#f80` (each digit doubled: `#f80` → `#ff8800`).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix tolerates a leading `+`, so check digits up front.
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidFormat(hex.to_string()));
        }
        let invalid = |_| ColorError::InvalidFormat(hex.to_string());
        match digits.len() {
            3 => {
                let r = u8::from_str_radix(&digits[0..1], 16).map_err(invalid)?;
                let g = u8::from_str_radix(&digits[1..2], 16).map_err(invalid)?;
                let b = u8::from_str_radix(&digits[2..3], 16).map_err(invalid)?;
                Ok(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).map_err(invalid)?;
                let g = u8::from_str_radix(&digits[2..4], 16).map_err(invalid)?;
                let b = u8::from_str_radix(&digits[4..6], 16).map_err(invalid)?;
                Ok(Self { r, g, b })
            }
            _ => Err(ColorError::InvalidFormat(hex.to_string())),
        }
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Format as canonical display hex `#RRGGBB` (uppercase).
    pub fn format_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Format as `rgb(r, g, b)`.
    pub fn format_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to CIELAB (for K-means clustering and deduplication).
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Create from CIELAB.
    pub fn from_lab(lab: Lab) -> Self {
        let srgb_f32: Srgb<f32> = Srgb::from_color(lab);
        Self::from_srgb_f32_clamped(srgb_f32)
    }

    /// Convert to full-precision HSL.
    pub fn to_hsl(self) -> palette::Hsl {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Create from full-precision HSL. Round-trips `to_hsl` within ±1 per
    /// channel.
    pub fn from_hsl(hsl: palette::Hsl) -> Self {
        let srgb_f32: Srgb<f32> = Srgb::from_color(hsl);
        Self::from_srgb_f32_clamped(srgb_f32)
    }

    /// HSL components rounded for display: hue in whole degrees [0,360),
    /// saturation/lightness as integer percentages.
    pub fn hsl(self) -> Hsl {
        let hsl = self.to_hsl();
        let h = hsl.hue.into_positive_degrees().round();
        Hsl {
            // 359.6° rounds up to 360, which wraps back to 0
            h: if h >= 360.0 { 0 } else { h as u16 },
            s: (hsl.saturation * 100.0).round() as u8,
            l: (hsl.lightness * 100.0).round() as u8,
        }
    }

    /// Clamp an Srgb<f32> to [0, 1] and convert to Color.
    fn from_srgb_f32_clamped(srgb: Srgb<f32>) -> Self {
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG 2.0 contrast ratio between two colors.
    ///
    /// Returns a value in [1, 21]. Higher means more contrast.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Pick a readable foreground for text on this background: black over
    /// light colors, white over dark ones. Luminance of exactly 0.5 gets
    /// white.
    pub fn contrast_color(self) -> Color {
        if self.relative_luminance() > CONTRAST_LUMINANCE_THRESHOLD {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// Generate `count` tonal variations of this color: hue and saturation
    /// held fixed, lightness spread evenly across 20%–80%, darkest first.
    /// A single variation sits at the 50% midpoint.
    pub fn value_variations(self, count: usize) -> Result<Vec<Color>, ColorError> {
        if count < 1 {
            return Err(ColorError::InvalidArgument(format!(
                "variation count must be at least 1, got {count}"
            )));
        }
        let base = self.to_hsl();
        let span = VARIATION_LIGHTNESS_MAX - VARIATION_LIGHTNESS_MIN;
        let variations = (0..count)
            .map(|i| {
                let l = if count == 1 {
                    VARIATION_LIGHTNESS_MIN + span / 2.0
                } else {
                    VARIATION_LIGHTNESS_MIN + span * i as f32 / (count - 1) as f32
                };
                Color::from_hsl(palette::Hsl::new(base.hue, base.saturation, l))
            })
            .collect();
        Ok(variations)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
