use crate::constants::{PARTICLE_SIZE, PARTICLE_SPREAD};
use glam::Vec3;
use rand::prelude::*;

/// Ambient particles scattered through the full scroll height of the page.
#[derive(Clone, Debug)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    /// Billboard edge length in world units.
    pub size: f32,
}

impl ParticleField {
    /// Scatter `count` particles over `sections` object slots spaced
    /// `spacing` apart. The same seed always yields the same field.
    pub fn scatter(count: usize, sections: usize, spacing: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let height = spacing * sections.max(1) as f32;
        let top = spacing * 0.5;
        let positions = (0..count)
            .map(|_| {
                let x = (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD;
                let y = top - rng.gen::<f32>() * height;
                let z = (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD;
                Vec3::new(x, y, z)
            })
            .collect();
        Self {
            positions,
            size: PARTICLE_SIZE,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_stay_inside_the_scroll_volume() {
        let field = ParticleField::scatter(500, 3, 4.0, 7);
        assert_eq!(field.len(), 500);
        let half = PARTICLE_SPREAD / 2.0;
        for p in &field.positions {
            assert!(p.x >= -half && p.x < half);
            assert!(p.z >= -half && p.z < half);
            assert!(p.y <= 2.0 && p.y > 2.0 - 12.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::scatter(16, 3, 4.0, 99);
        let b = ParticleField::scatter(16, 3, 4.0, 99);
        let c = ParticleField::scatter(16, 3, 4.0, 100);
        assert_eq!(a.positions, b.positions);
        assert_ne!(a.positions, c.positions);
    }
}
