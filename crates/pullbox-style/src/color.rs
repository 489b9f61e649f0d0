#![forbid(unsafe_code)]

//! 8-bit RGBA colors.
//!
//! Colors are usually written as `0xRRGGBB` literals or `"#rrggbb"` strings
//! in configuration. Alpha is stored as a byte but set through the
//! fractional [`Rgba::with_alpha`] helper.

use std::fmt;

use pullbox_core::animation::Interpolate;

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque color from a `0xRRGGBB` literal. Bits above 24 are ignored.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Gray level with fractional alpha.
    #[must_use]
    pub fn gray(level: u8, alpha: f64) -> Self {
        Self::rgb(level, level, level).with_alpha(alpha)
    }

    /// Parse `"rrggbb"`, `"#rrggbb"` or the same with a trailing alpha byte.
    ///
    /// Returns `None` for any other length or a non-hex digit.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Same color with alpha in [0.0, 1.0].
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self {
            a: (alpha * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as a fraction.
    #[inline]
    #[must_use]
    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// `"#rrggbb"`, or `"#rrggbbaa"` when not fully opaque.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Interpolate for Rgba {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| {
            f64::from(a)
                .interpolate(&f64::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::new(
            mix(self.r, to.r),
            mix(self.g, to.g),
            mix(self.b, to.b),
            mix(self.a, to.a),
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_splits_channels() {
        let c = Rgba::from_hex(0x0d8cfe);
        assert_eq!(c, Rgba::rgb(0x0d, 0x8c, 0xfe));
        assert_eq!(c.a, 255);
    }

    #[test]
    fn parse_accepts_optional_hash_and_alpha() {
        assert_eq!(Rgba::parse("FF0000"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse("#b0b0b0"), Some(Rgba::from_hex(0xb0b0b0)));
        assert_eq!(Rgba::parse("#00000080"), Some(Rgba::new(0, 0, 0, 0x80)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(Rgba::parse(""), None);
        assert_eq!(Rgba::parse("#fff"), None);
        assert_eq!(Rgba::parse("zz0000"), None);
        assert_eq!(Rgba::parse("ÿÿÿ"), None);
    }

    #[test]
    fn hex_string_round_trips() {
        for c in [Rgba::from_hex(0xb4b9c0), Rgba::new(1, 2, 3, 4)] {
            assert_eq!(Rgba::parse(&c.to_hex_string()), Some(c));
        }
        assert_eq!(Rgba::WHITE.to_hex_string(), "#ffffff");
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(2.0).a, 255);
        assert_eq!(Rgba::WHITE.with_alpha(-1.0).a, 0);
        assert_eq!(Rgba::gray(128, 0.5).a, 128);
    }

    #[test]
    fn interpolation_mixes_channels() {
        let gray = Rgba::from_hex(0xb0b0b0);
        let blue = Rgba::from_hex(0x0d8cfe);
        assert_eq!(gray.interpolate(&blue, 0.0), gray);
        assert_eq!(gray.interpolate(&blue, 1.0), blue);
        let mid = Rgba::BLACK.interpolate(&Rgba::WHITE, 0.5);
        assert_eq!(mid, Rgba::rgb(128, 128, 128));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgba::from_hex(0x0885f2)).expect("serialize");
        assert_eq!(json, "\"#0885f2\"");
        let back: Rgba = serde_json::from_str("\"75c5fd\"").expect("deserialize");
        assert_eq!(back, Rgba::from_hex(0x75c5fd));
        assert!(serde_json::from_str::<Rgba>("\"blue\"").is_err());
    }
}
