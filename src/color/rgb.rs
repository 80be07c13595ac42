//! 8-bit RGB color value with hex conversion and distance helpers

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::{constants::rgb::CHANNEL_MAX, MatchError, Result};

/// An sRGB color with one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wide channel values, rejecting any out of [0, 255]
    pub fn try_from_channels(r: i64, g: i64, b: i64) -> Result<Self> {
        let check = |name: &str, value: i64| {
            u8::try_from(value).map_err(|_| {
                MatchError::color_parse(
                    format!("({r}, {g}, {b})"),
                    format!("{name} channel {value} outside 0-255"),
                )
            })
        };
        Ok(Self {
            r: check("red", r)?,
            g: check("green", g)?,
            b: check("blue", b)?,
        })
    }

    /// Parse a six digit hex color, with or without the leading `#`
    ///
    /// Case is ignored. Shorthand forms like `#abc` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::ColorParse` if the text is not exactly six hex digits
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MatchError::color_parse(
                hex,
                format!("expected 6 hex digits, got {} characters", digits.len()),
            ));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| MatchError::color_parse(hex, e.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb` representation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Uppercase `#RRGGBB` representation used for display
    pub fn to_hex_upper(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Euclidean distance to `other` in RGB space
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Clamp a wide integer to a channel value
pub fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, i64::from(CHANNEL_MAX)) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(color: Rgb) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}
