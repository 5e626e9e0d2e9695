//! Degree/radian mapping between operator-facing storage and the renderer.
//!
//! Hotspots and spheres store angles in degrees; the engine works in radians.
//! The mapper itself never validates or wraps: yaw normalization happens at
//! the boundaries that read or write stored values.

use glam::DVec3;
use std::f64::consts::PI;

#[inline]
pub fn to_radians(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Radians to degrees, rounded to 2 decimals for display and storage.
#[inline]
pub fn to_degrees(rad: f64) -> f64 {
    round2(rad * 180.0 / PI)
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Wrap a yaw in degrees into `[0, 360)`.
#[inline]
pub fn normalize_yaw_degrees(yaw: f64) -> f64 {
    if !yaw.is_finite() {
        return 0.0;
    }
    let wrapped = yaw.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// A direction on the panorama sphere, in radians.
///
/// Yaw 0 looks toward -Z, positive yaw turns right, positive pitch looks up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphericalPosition {
    pub yaw: f64,
    pub pitch: f64,
}

impl SphericalPosition {
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Stored degrees to engine radians; yaw is normalized first.
    pub fn from_degrees(yaw_deg: f64, pitch_deg: f64) -> Self {
        Self {
            yaw: to_radians(normalize_yaw_degrees(yaw_deg)),
            pitch: to_radians(pitch_deg),
        }
    }

    /// Engine radians to stored degrees: `(yaw in [0, 360), pitch)`.
    pub fn to_degrees(self) -> (f64, f64) {
        let yaw = round2(normalize_yaw_degrees(to_degrees(self.yaw)));
        // rounding may land exactly on 360.00
        let yaw = if yaw >= 360.0 { 0.0 } else { yaw };
        (yaw, to_degrees(self.pitch))
    }

    pub fn direction(self) -> DVec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        DVec3::new(cp * sy, sp, -cp * cy)
    }

    pub fn from_direction(dir: DVec3) -> Self {
        let d = dir.normalize_or_zero();
        if d == DVec3::ZERO {
            return Self::default();
        }
        Self {
            yaw: d.x.atan2(-d.z),
            pitch: d.y.clamp(-1.0, 1.0).asin(),
        }
    }
}
