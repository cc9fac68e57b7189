//! Frame/event coordinator.
//!
//! Owns the view state and the scene description. Input handlers mutate the
//! state; [`Coordinator::frame`] derives object rotations and camera
//! placement from it once per display refresh. Section changes detected on
//! scroll start the one-shot rotation and title tweens through an
//! [`Animator`].

use crate::color::Rgb;
use crate::constants::OBJECT_COUNT;
use crate::glyphs::GlyphStyle;
use crate::params::SceneParams;
use crate::scene::{layout_objects, SceneObject, Section};
use crate::state::{Camera, CameraRig, ProjectionUpdate, ViewState, Viewport};
use crate::tween::{Animator, TargetId};
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionChange {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectPose {
    pub slot: usize,
    pub rotation: Vec3,
    pub model: Mat4,
}

/// Current letter styles of one animated title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleFrame {
    pub section: usize,
    pub styles: SmallVec<[GlyphStyle; 24]>,
}

/// Everything a presenter needs to draw one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub elapsed: f32,
    pub delta: f32,
    pub objects: [ObjectPose; OBJECT_COUNT],
    pub camera: Camera,
    pub material_color: Rgb,
    pub titles: Vec<TitleFrame>,
}

pub struct Coordinator {
    params: SceneParams,
    state: ViewState,
    rig: CameraRig,
    objects: [SceneObject; OBJECT_COUNT],
    sections: Vec<Section>,
    material_color: Rgb,
}

impl Coordinator {
    pub fn new(params: SceneParams, viewport: Viewport, sections: Vec<Section>) -> Self {
        let objects = layout_objects(params.object_spacing);
        let material_color = params.material_color;
        Self {
            params,
            state: ViewState::new(viewport),
            rig: CameraRig::default(),
            objects,
            sections,
            material_color,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn objects(&self) -> &[SceneObject; OBJECT_COUNT] {
        &self.objects
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn material_color(&self) -> Rgb {
        self.material_color
    }

    pub fn set_material_color(&mut self, color: Rgb) {
        self.material_color = color;
    }

    /// Reveal the title of the section showing at load time.
    pub fn start<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        let section = self.state.section;
        self.animate_title(section, animator);
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.state.cursor = self.state.viewport.normalize_cursor(client_x, client_y);
    }

    /// Record the scroll offset and run a section transition if the nearest
    /// section changed. A jump across several sections is one transition.
    pub fn on_scroll<A: Animator + ?Sized>(
        &mut self,
        scroll_y: f32,
        animator: &mut A,
    ) -> Option<SectionChange> {
        let scroll_y = if scroll_y.is_finite() {
            scroll_y.max(0.0)
        } else {
            0.0
        };
        self.state.scroll_y = scroll_y;
        let next = self.state.viewport.section_at(scroll_y);
        if next == self.state.section {
            return None;
        }
        let change = SectionChange {
            from: self.state.section,
            to: next,
        };
        self.state.section = next;
        log::info!("[scroll] section {} -> {}", change.from, change.to);
        self.transition(change, animator);
        Some(change)
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> ProjectionUpdate {
        self.state.viewport = viewport;
        viewport.projection_update()
    }

    fn transition<A: Animator + ?Sized>(&mut self, change: SectionChange, animator: &mut A) {
        animator.cancel(TargetId::TitleLetters(change.from));
        animator.cancel(TargetId::TitleLetters(change.to));
        let Some(section) = self.sections.get(change.to).copied() else {
            log::debug!("[scroll] no section {} in the page", change.to);
            return;
        };
        animator.animate_relative(
            TargetId::ObjectRotation(section.object_slot),
            self.params.transition_rotation,
            self.params.transition,
        );
        self.animate_title(section.index, animator);
    }

    fn animate_title<A: Animator + ?Sized>(&self, index: usize, animator: &mut A) {
        let Some(count) = self
            .sections
            .get(index)
            .and_then(|s| s.glyph_count)
            .filter(|n| *n > 0)
        else {
            return;
        };
        animator.animate_staggered(
            TargetId::TitleLetters(index),
            count,
            GlyphStyle::HIDDEN.to_channels(),
            GlyphStyle::SHOWN.to_channels(),
            self.params.title,
            self.params.title_stagger,
        );
    }

    /// Per-frame update: idle spin plus tween offsets, eased cursor parallax
    /// and the scroll-locked camera height.
    pub fn frame<A: Animator + ?Sized>(&mut self, elapsed: f32, animator: &A) -> FrameSnapshot {
        let delta = self.state.advance_clock(elapsed);

        for obj in &mut self.objects {
            let offset = animator
                .value(TargetId::ObjectRotation(obj.slot), 0)
                .unwrap_or(Vec3::ZERO);
            obj.rotation = obj.idle_spin(elapsed, self.params.spin_rate) + offset;
        }

        let cursor = self.state.cursor;
        let target = Vec2::new(cursor.x, -cursor.y) * self.params.parallax_amplitude;
        self.rig.ease_toward(target, delta, self.params.parallax_damping);
        self.rig.offset_y = CameraRig::scroll_offset(
            self.state.scroll_y,
            self.state.viewport.height,
            self.params.object_spacing,
        );

        FrameSnapshot {
            elapsed,
            delta,
            objects: self.objects.map(|o| ObjectPose {
                slot: o.slot,
                rotation: o.rotation,
                model: o.model_matrix(),
            }),
            camera: self.rig.camera(self.state.viewport.aspect()),
            material_color: self.material_color,
            titles: self.title_frames(animator),
        }
    }

    fn title_frames<A: Animator + ?Sized>(&self, animator: &A) -> Vec<TitleFrame> {
        self.sections
            .iter()
            .filter_map(|s| {
                let count = s.glyph_count?;
                let target = TargetId::TitleLetters(s.index);
                let styles = (0..count)
                    .map(|i| animator.value(target, i).map(GlyphStyle::from_channels))
                    .collect::<Option<SmallVec<_>>>()?;
                Some(TitleFrame {
                    section: s.index,
                    styles,
                })
            })
            .collect()
    }
}
