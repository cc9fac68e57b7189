use crate::color::Rgb;
use crate::constants::*;
use crate::tween::{Ease, Timing};
use glam::{Vec2, Vec3};

/// Tunables for one scene instance. `Default` reproduces the shipped page.
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub object_spacing: f32,
    pub parallax_amplitude: f32,
    pub parallax_damping: f32,
    pub spin_rate: Vec2,
    pub transition_rotation: Vec3,
    pub transition: Timing,
    pub title: Timing,
    pub title_stagger: f32,
    pub particle_count: usize,
    pub particle_seed: u64,
    pub material_color: Rgb,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            object_spacing: OBJECT_SPACING,
            parallax_amplitude: PARALLAX_AMPLITUDE,
            parallax_damping: PARALLAX_DAMPING,
            spin_rate: SPIN_RATE,
            transition_rotation: TRANSITION_ROTATION,
            transition: Timing::new(TRANSITION_DURATION_SEC, Ease::Power2InOut),
            title: Timing::new(TITLE_DURATION_SEC, Ease::BACK_OUT),
            title_stagger: TITLE_STAGGER_SEC,
            particle_count: PARTICLE_COUNT,
            particle_seed: PARTICLE_SEED,
            material_color: Rgb::default(),
        }
    }
}
