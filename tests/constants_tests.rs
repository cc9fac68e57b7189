// Host-side tests for the browser-side constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn particle_quad_is_two_triangles_around_the_origin() {
    assert_eq!(PARTICLE_QUAD.len(), 6);
    let (sx, sy) = PARTICLE_QUAD
        .iter()
        .fold((0.0f32, 0.0f32), |(x, y), c| (x + c[0], y + c[1]));
    // the shared diagonal corners appear twice, so the sum is zero only
    // when the square is centred
    assert!(sx.abs() < 1e-6 && sy.abs() < 1e-6);
    for c in PARTICLE_QUAD {
        assert!(c[0].abs() == 0.5 && c[1].abs() == 0.5);
    }
}

#[test]
fn particle_quad_triangles_are_counter_clockwise() {
    for tri in PARTICLE_QUAD.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]];
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross > 0.0);
    }
}

#[test]
fn selectors_are_not_empty() {
    for s in [CANVAS_SELECTOR, SECTION_SELECTOR, TITLE_SELECTOR, GLYPH_TAG, COLOR_INPUT_ID] {
        assert!(!s.trim().is_empty());
    }
    assert!(CANVAS_SELECTOR.starts_with("canvas"));
}

#[test]
fn clear_colours_match_their_alpha_modes() {
    assert_eq!(CLEAR_TRANSPARENT[3], 0.0);
    assert_eq!(CLEAR_OPAQUE[3], 1.0);
    for c in CLEAR_OPAQUE.iter().chain(CLEAR_TRANSPARENT.iter()) {
        assert!((0.0..=1.0).contains(c));
    }
}
