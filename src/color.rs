// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! RGB color values for draw styles and configuration.

use serde::de::{self, Deserialize, Deserializer};
use std::str::FromStr;
use thiserror::Error;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    rgb: u32,
}

/// Error parsing a color from a `#RRGGBB` string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("expected 6 hex digits, got {0:?}")]
    Length(String),
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

impl Color {
    pub const WHITE: Color = Color::from_rgb(0xFFFFFF);
    pub const BLACK: Color = Color::from_rgb(0x000000);

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_rgb(rgb: u32) -> Self {
        Color {
            rgb: rgb & 0x00FF_FFFF,
        }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color {
            rgb: ((r as u32) << 16) | ((g as u32) << 8) | b as u32,
        }
    }

    pub const fn rgb(&self) -> u32 {
        self.rgb
    }

    pub const fn r(&self) -> u8 {
        (self.rgb >> 16) as u8
    }

    pub const fn g(&self) -> u8 {
        (self.rgb >> 8) as u8
    }

    pub const fn b(&self) -> u8 {
        self.rgb as u8
    }

    /// Blend toward white by `amount` in `[0, 1]`.
    pub fn lighten(&self, amount: f64) -> Color {
        let amount = amount.clamp(0.0, 1.0);
        let channel = |c: u8| c as f64 + (255.0 - c as f64) * amount;
        Color::from_rgb8(
            channel(self.r()) as u8,
            channel(self.g()) as u8,
            channel(self.b()) as u8,
        )
    }

    /// Scale all channels toward black by `amount` in `[0, 1]`.
    pub fn darken(&self, amount: f64) -> Color {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        Color::from_rgb8(
            (self.r() as f64 * keep) as u8,
            (self.g() as f64 * keep) as u8,
            (self.b() as f64 * keep) as u8,
        )
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(ParseColorError::Length(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Color::from_rgb)
            .map_err(|_| ParseColorError::Digits(s.to_string()))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.rgb)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
