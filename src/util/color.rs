//! RGB colours used for window backgrounds, text and decorations.

use std::fmt;

use crate::core::errors::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const PINK: Color = Color::rgb(255, 192, 203);
    pub const BROWN: Color = Color::rgb(165, 42, 42);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(CoreError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| CoreError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Build a colour from unit-range channels, truncating toward zero.
    pub fn from_unit_rgb(red: f64, green: f64, blue: f64) -> Result<Self> {
        let unit = |v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok((v * 255.0) as u8)
            } else {
                Err(CoreError::InvalidColor(format!("({red}, {green}, {blue})")))
            }
        };
        Ok(Self::rgb(unit(red)?, unit(green)?, unit(blue)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
