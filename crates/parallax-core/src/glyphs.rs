//! Title text split into per-letter units.
//!
//! Splitting is a pure text transform: the web frontend turns each [`Glyph`]
//! into a DOM span once at startup and afterwards only writes the
//! [`GlyphStyle`] values produced by the title tweens.

use glam::Vec3;
use smallvec::SmallVec;

pub type Glyphs = SmallVec<[Glyph; 24]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub index: usize,
    pub ch: char,
}

impl Glyph {
    pub fn is_space(&self) -> bool {
        self.ch.is_whitespace()
    }

    /// Character to display; whitespace becomes a non-breaking space so an
    /// inline-block span keeps its width.
    pub fn display_char(&self) -> char {
        if self.is_space() {
            '\u{00a0}'
        } else {
            self.ch
        }
    }
}

/// Split a title into ordered glyphs, one per `char`, trimming the ends.
pub fn split_glyphs(text: &str) -> Glyphs {
    text.trim()
        .chars()
        .enumerate()
        .map(|(index, ch)| Glyph { index, ch })
        .collect()
}

/// Animated style of one title letter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    pub opacity: f32,
    /// CSS pixels.
    pub translate_y: f32,
    /// Degrees.
    pub rotate_x: f32,
}

impl GlyphStyle {
    pub const HIDDEN: GlyphStyle = GlyphStyle {
        opacity: 0.0,
        translate_y: 50.0,
        rotate_x: 90.0,
    };
    pub const SHOWN: GlyphStyle = GlyphStyle {
        opacity: 1.0,
        translate_y: 0.0,
        rotate_x: 0.0,
    };

    pub fn to_channels(self) -> Vec3 {
        Vec3::new(self.opacity, self.translate_y, self.rotate_x)
    }

    pub fn from_channels(v: Vec3) -> Self {
        Self {
            opacity: v.x,
            translate_y: v.y,
            rotate_x: v.z,
        }
    }

    pub fn css_opacity(&self) -> String {
        format!("{:.3}", self.opacity.clamp(0.0, 1.0))
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translateY({:.2}px) rotateX({:.2}deg)",
            self.translate_y, self.rotate_x
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_in_order_and_keeps_spaces() {
        let g = split_glyphs("  My work ");
        let text: String = g.iter().map(|g| g.ch).collect();
        assert_eq!(text, "My work");
        assert!(g[2].is_space());
        assert_eq!(g[2].display_char(), '\u{00a0}');
        assert!(g.iter().enumerate().all(|(i, gl)| gl.index == i));
    }

    #[test]
    fn multibyte_letters_are_single_glyphs() {
        assert_eq!(split_glyphs("Café").len(), 4);
        assert!(split_glyphs("   ").is_empty());
    }

    #[test]
    fn css_strings() {
        assert_eq!(GlyphStyle::HIDDEN.css_opacity(), "0.000");
        assert_eq!(
            GlyphStyle::HIDDEN.css_transform(),
            "translateY(50.00px) rotateX(90.00deg)"
        );
        let over = GlyphStyle {
            opacity: 1.08,
            ..GlyphStyle::SHOWN
        };
        assert_eq!(over.css_opacity(), "1.000");
    }
}
