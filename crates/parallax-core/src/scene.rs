use crate::constants::{OBJECT_COUNT, OBJECT_X, SPIN_SIGNS};
use crate::geometry::Shape;
use glam::{EulerRot, Mat4, Vec2, Vec3};

/// One of the three section meshes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub slot: usize,
    pub position: Vec3,
    pub spin_sign: f32,
    pub rotation: Vec3,
}

impl SceneObject {
    pub fn new(shape: Shape, slot: usize, spacing: f32) -> Self {
        Self {
            shape,
            slot,
            position: Vec3::new(
                OBJECT_X[slot % OBJECT_COUNT],
                -(slot as f32) * spacing,
                0.0,
            ),
            spin_sign: SPIN_SIGNS[slot % OBJECT_COUNT],
            rotation: Vec3::ZERO,
        }
    }

    /// Continuous idle rotation, independent of scroll and cursor.
    pub fn idle_spin(&self, elapsed: f32, rate: Vec2) -> Vec3 {
        Vec3::new(rate.x, rate.y, 0.0) * elapsed * self.spin_sign
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Place the three objects in their slots, alternating sides going down.
pub fn layout_objects(spacing: f32) -> [SceneObject; OBJECT_COUNT] {
    std::array::from_fn(|slot| SceneObject::new(Shape::BY_SLOT[slot], slot, spacing))
}

/// A scrollable page section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub index: usize,
    pub object_slot: usize,
    /// Letters in the section heading; `None` when the section has none.
    pub glyph_count: Option<usize>,
}

impl Section {
    pub fn new(index: usize, glyph_count: Option<usize>) -> Self {
        Self {
            index,
            object_slot: index % OBJECT_COUNT,
            glyph_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_step_down_one_spacing_per_slot() {
        let objs = layout_objects(4.0);
        let ys: Vec<f32> = objs.iter().map(|o| o.position.y).collect();
        assert_eq!(ys, vec![0.0, -4.0, -8.0]);
        assert_eq!(objs[1].position.x, 2.0);
        assert_eq!(objs[1].shape, Shape::Capsule);
    }

    #[test]
    fn middle_object_spins_the_other_way() {
        let objs = layout_objects(4.0);
        let rate = Vec2::new(0.1, 0.12);
        let a = objs[0].idle_spin(10.0, rate);
        let b = objs[1].idle_spin(10.0, rate);
        assert!((a.x - 1.0).abs() < 1e-6 && (a.y - 1.2).abs() < 1e-6);
        assert_eq!(a, -b);
    }
}
