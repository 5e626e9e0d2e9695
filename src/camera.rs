//! Camera at the center of the panorama sphere.
//!
//! Shared by the renderer (inverse view-projection for the fullscreen pass),
//! the marker overlay (projecting marker positions to pixels) and placement
//! (turning a clicked pixel back into a direction).

use crate::config::ViewerOptions;
use crate::constants::{CAMERA_ZFAR, CAMERA_ZNEAR, MAX_VIEW_PITCH_DEG};
use crate::coords::{to_radians, SphericalPosition};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f64::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct PanoramaCamera {
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
    min_fov: f64,
    max_fov: f64,
    sensitivity: f64,
}

impl PanoramaCamera {
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov: to_radians(options.default_fov_deg),
            min_fov: to_radians(options.min_fov_deg),
            max_fov: to_radians(options.max_fov_deg),
            sensitivity: options.drag_sensitivity,
        }
    }

    pub fn position(&self) -> SphericalPosition {
        SphericalPosition::new(self.yaw, self.pitch)
    }

    pub fn rotate_to(&mut self, position: SphericalPosition) {
        self.yaw = position.yaw.rem_euclid(TAU);
        self.pitch = clamp_view_pitch(position.pitch);
    }

    /// Rotate by a pointer drag of `(dx, dy)` CSS pixels so the content
    /// under the pointer follows it.
    pub fn drag_by(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let rad_per_px = self.fov / viewport_height as f64 * self.sensitivity;
        self.yaw = (self.yaw - dx as f64 * rad_per_px).rem_euclid(TAU);
        self.pitch = clamp_view_pitch(self.pitch + dy as f64 * rad_per_px);
    }

    pub fn spin(&mut self, delta_yaw: f64) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(TAU);
    }

    pub fn zoom_by(&mut self, delta_fov: f64) {
        self.fov = (self.fov + delta_fov).clamp(self.min_fov, self.max_fov);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.position().direction().as_vec3();
        Mat4::look_to_rh(Vec3::ZERO, forward, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov as f32, aspect.max(1e-3), CAMERA_ZNEAR, CAMERA_ZFAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Direction through pixel `(sx, sy)` of a `width` x `height` viewport.
    pub fn screen_to_position(
        &self,
        sx: f32,
        sy: f32,
        width: f32,
        height: f32,
    ) -> SphericalPosition {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj(width / height.max(1.0)).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let dir: Vec3 = p_far.truncate() / p_far.w;
        SphericalPosition::from_direction(dir.as_dvec3())
    }

    /// Pixel position of `position`, or `None` when it is behind the camera.
    pub fn project(&self, position: SphericalPosition, width: f32, height: f32) -> Option<Vec2> {
        let dir = position.direction().as_vec3();
        let clip = self.view_proj(width / height.max(1.0)) * dir.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

fn clamp_view_pitch(pitch: f64) -> f64 {
    let limit = to_radians(MAX_VIEW_PITCH_DEG);
    pitch.clamp(-limit, limit)
}
