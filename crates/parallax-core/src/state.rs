//! View state and camera types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The browser side
//! feeds raw pixel measurements in; the coordinator turns them into the
//! normalised cursor, section index and camera placement used per frame.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, MAX_PIXEL_RATIO};
use glam::{Mat4, Vec2, Vec3};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ViewportError {
    #[error("viewport must have a positive finite size, got {width}x{height}")]
    Degenerate { width: f32, height: f32 },
}

/// Browser viewport in CSS pixels plus the display's pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Result<Self, ViewportError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(width) || !ok(height) {
            return Err(ViewportError::Degenerate { width, height });
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// Device pixel ratio capped at [`MAX_PIXEL_RATIO`] to bound fill cost.
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Backing-store size of the render surface in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        let pr = self.pixel_ratio();
        let w = (self.width * pr).round() as u32;
        let h = (self.height * pr).round() as u32;
        (w.max(1), h.max(1))
    }

    /// Map client coordinates to \[-0.5, 0.5\] on both axes.
    pub fn normalize_cursor(&self, client_x: f32, client_y: f32) -> Vec2 {
        let x = (client_x / self.width - 0.5).clamp(-0.5, 0.5);
        let y = (client_y / self.height - 0.5).clamp(-0.5, 0.5);
        Vec2::new(x, y)
    }

    /// Section whose top edge is nearest to the current scroll offset.
    pub fn section_at(&self, scroll_y: f32) -> usize {
        (scroll_y.max(0.0) / self.height).round() as usize
    }

    /// Projection and surface parameters for this viewport.
    pub fn projection_update(&self) -> ProjectionUpdate {
        let (surface_width, surface_height) = self.surface_size();
        ProjectionUpdate {
            css_width: self.width,
            css_height: self.height,
            aspect: self.aspect(),
            pixel_ratio: self.pixel_ratio(),
            surface_width,
            surface_height,
        }
    }
}

/// What a renderer has to change after the viewport was resized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionUpdate {
    /// Displayed size of the surface in CSS pixels.
    pub css_width: f32,
    pub css_height: f32,
    pub aspect: f32,
    pub pixel_ratio: f32,
    pub surface_width: u32,
    pub surface_height: u32,
}

/// Mutable per-page view state, owned by the coordinator.
#[derive(Clone, Debug)]
pub struct ViewState {
    pub cursor: Vec2,
    pub scroll_y: f32,
    pub section: usize,
    pub elapsed: f32,
    pub previous: f32,
    pub viewport: Viewport,
}

impl ViewState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            cursor: Vec2::ZERO,
            scroll_y: 0.0,
            section: 0,
            elapsed: 0.0,
            previous: 0.0,
            viewport,
        }
    }

    /// Time between the previous frame and `elapsed`, never negative.
    pub fn delta_to(&self, elapsed: f32) -> f32 {
        (elapsed - self.previous).max(0.0)
    }

    /// Record a new frame time and return the frame delta.
    pub fn advance_clock(&mut self, elapsed: f32) -> f32 {
        let delta = self.delta_to(elapsed);
        self.elapsed = elapsed;
        self.previous = elapsed;
        delta
    }
}

/// Camera group displaced by the cursor, with the camera itself offset
/// vertically by the scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRig {
    pub group: Vec2,
    pub offset_y: f32,
}

impl CameraRig {
    /// Exponential approach toward `target`, scaled by the frame delta.
    pub fn ease_toward(&mut self, target: Vec2, delta: f32, damping: f32) {
        // capped at 1: a frame gap longer than 1/damping (0.2 s at the default
        // damping of 5) would otherwise step past the target
        let k = (delta * damping).clamp(0.0, 1.0);
        self.group += (target - self.group) * k;
    }

    /// Camera height for a scroll offset: one object spacing per viewport.
    pub fn scroll_offset(scroll_y: f32, viewport_height: f32, spacing: f32) -> f32 {
        -(scroll_y / viewport_height) * spacing
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(self.group.x, self.group.y + self.offset_y, CAMERA_Z)
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        let eye = self.eye();
        Camera {
            eye,
            target: eye + Vec3::NEG_Z,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_viewport() {
        assert!(Viewport::new(0.0, 600.0, 1.0).is_err());
        assert!(Viewport::new(800.0, f32::NAN, 1.0).is_err());
        assert!(Viewport::new(800.0, 600.0, 1.0).is_ok());
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let vp = Viewport::new(100.0, 50.0, 3.0).unwrap();
        assert_eq!(vp.pixel_ratio(), MAX_PIXEL_RATIO);
        assert_eq!(vp.surface_size(), (200, 100));
        let odd = Viewport::new(100.0, 50.0, 0.0).unwrap();
        assert_eq!(odd.pixel_ratio(), 1.0);
    }

    #[test]
    fn projection_update_keeps_css_size_next_to_backing_size() {
        let vp = Viewport::new(1000.0, 800.0, 2.0).unwrap();
        let update = vp.projection_update();
        assert_eq!((update.css_width, update.css_height), (1000.0, 800.0));
        assert_eq!((update.surface_width, update.surface_height), (2000, 1600));
    }

    #[test]
    fn long_frame_gap_lands_on_target_without_overshoot() {
        let mut rig = CameraRig::default();
        let target = Vec2::new(0.25, -0.2);
        rig.ease_toward(target, 0.5, 5.0);
        assert_eq!(rig.group, target);
    }

    #[test]
    fn clock_delta_never_negative() {
        let mut s = ViewState::new(Viewport::new(10.0, 10.0, 1.0).unwrap());
        assert_eq!(s.advance_clock(0.5), 0.5);
        assert_eq!(s.advance_clock(0.25), 0.0);
        assert_eq!(s.previous, 0.25);
    }

    #[test]
    fn view_projection_is_projection_after_view() {
        let cam = CameraRig::default().camera(1.25);
        let combined = cam.projection_matrix() * cam.view_matrix();
        assert!(cam.view_projection().abs_diff_eq(combined, 1e-6));
    }

    #[test]
    fn camera_looks_down_negative_z() {
        let rig = CameraRig {
            group: Vec2::new(0.2, -0.1),
            offset_y: -4.0,
        };
        let cam = rig.camera(1.5);
        let view = cam.view_matrix();
        let p = view.transform_point3(rig.eye() + Vec3::new(0.0, 0.0, -3.0));
        assert!(p.truncate().length() < 1e-5);
        assert!((p.z + 3.0).abs() < 1e-5);
    }
}
