//! Overlay colors given by name or as `#rrggbb`.

use image::Rgb;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::SlideboxError;

const NAMED: [(&str, [u8; 3]); 10] = [
    ("red", [255, 0, 0]),
    ("green", [0, 160, 0]),
    ("blue", [0, 0, 255]),
    ("black", [0, 0, 0]),
    ("orange", [255, 165, 0]),
    ("magenta", [255, 0, 255]),
    ("cyan", [0, 200, 200]),
    ("purple", [128, 0, 128]),
    ("yellow", [230, 200, 0]),
    ("gray", [128, 128, 128]),
];

/// The color a box border is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayColor(pub Rgb<u8>);

impl OverlayColor {
    pub const RED: OverlayColor = OverlayColor(Rgb([255, 0, 0]));

    pub fn rgb(&self) -> Rgb<u8> {
        self.0
    }
}

impl Default for OverlayColor {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for OverlayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0 .0;
        if let Some((name, _)) = NAMED.iter().find(|(_, rgb)| *rgb == [r, g, b]) {
            return f.write_str(name);
        }
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for OverlayColor {
    type Err = SlideboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        let lookup = if lower == "grey" { "gray" } else { lower.as_str() };
        if let Some((_, rgb)) = NAMED.iter().find(|(name, _)| *name == lookup) {
            return Ok(OverlayColor(Rgb(*rgb)));
        }

        let invalid = || {
            SlideboxError::InvalidColor(format!(
                "'{}' (expected a color name or #rrggbb)",
                s
            ))
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(OverlayColor(Rgb([channel(0)?, channel(2)?, channel(4)?])))
    }
}

impl Serialize for OverlayColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
