use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour {0:?}, expected #rrggbb or #rgb")]
    InvalidHex(String),
}

/// sRGB colour with components in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand; the leading `#` is optional.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix would accept a leading sign
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match hex.len() {
            6 => {
                let v = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(Self::from_rgb8((v >> 16) as u8, (v >> 8) as u8, v as u8))
            }
            3 => {
                let v = u16::from_str_radix(hex, 16).map_err(|_| invalid())?;
                let nib = |shift: u16| ((v >> shift) & 0xf) as u8 * 17;
                Ok(Self::from_rgb8(nib(8), nib(4), nib(0)))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Convert to linear light for shading into an sRGB render target.
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::from_rgb8(0xff, 0xed, 0xed)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MATERIAL_HEX;

    #[test]
    fn default_matches_material_hex() {
        assert_eq!(Rgb::from_hex(DEFAULT_MATERIAL_HEX), Ok(Rgb::default()));
        assert_eq!(Rgb::default().to_string(), DEFAULT_MATERIAL_HEX);
    }

    #[test]
    fn shorthand_expands_each_nibble() {
        let c: Rgb = "#f80".parse().unwrap();
        assert_eq!(c.to_rgb8(), [0xff, 0x88, 0x00]);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "#", "#ff", "#ffeded0", "#+fffff", "#gggggg", "ff ed ed"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        let [r, g, b] = Rgb::WHITE.to_linear();
        assert!((r - 1.0).abs() < 1e-6 && (g - 1.0).abs() < 1e-6 && (b - 1.0).abs() < 1e-6);
        let [k, _, _] = Rgb::from_rgb8(0, 0, 0).to_linear();
        assert_eq!(k, 0.0);
    }
}
