//! sRGB color used for trail strokes and surface backgrounds.

use crate::error::FlowError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses `"#ff00aa"` or `"ff00aa"` (case insensitive).
    ///
    /// Returns `FlowError::InvalidColor` for anything but six hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, FlowError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FlowError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| FlowError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats as `"#rrggbb"`, quantizing each channel to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Opaque RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Srgb::from_hex("#ffffff").unwrap(), Srgb::WHITE);
        assert_eq!(Srgb::from_hex("000000").unwrap(), Srgb::BLACK);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        assert_eq!(
            Srgb::from_hex("#FF8000").unwrap(),
            Srgb::from_hex("#ff8000").unwrap()
        );
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Srgb::from_hex("#fff"),
            Err(FlowError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        let err = Srgb::from_hex("#gg0000").unwrap_err();
        assert!(err.to_string().contains("red"), "got: {err}");
    }

    #[test]
    fn from_hex_rejects_multibyte_input() {
        assert!(Srgb::from_hex("ééé").is_err());
    }

    #[test]
    fn to_hex_formats_lowercase() {
        let c = Srgb::from_hex("#1A2B3C").unwrap();
        assert_eq!(c.to_hex(), "#1a2b3c");
    }

    #[test]
    fn to_rgba8_is_opaque() {
        assert_eq!(Srgb::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Srgb::BLACK.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Srgb::WHITE).unwrap();
        assert_eq!(json, "\"#ffffff\"");
        let back: Srgb = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(back, Srgb::BLACK);
    }

    #[test]
    fn deserialize_reports_bad_color() {
        assert!(serde_json::from_str::<Srgb>("\"nope\"").is_err());
    }
}
