//! Follow camera
//!
//! The camera hangs at a fixed height on the center line and trails the
//! ball along z, always looking at it.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_HEIGHT, CAMERA_TRAIL, CAMERA_X};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// Pose trailing a ball at `point`
    pub fn follow(point: Vec3) -> Self {
        Self {
            eye: Vec3::new(CAMERA_X, CAMERA_HEIGHT, point.z + CAMERA_TRAIL),
            target: point,
        }
    }

    /// World -> view transform (right-handed, +Y up)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

impl Default for CameraPose {
    /// Overview of the goal before the first frame
    fn default() -> Self {
        Self {
            eye: Vec3::new(CAMERA_X, CAMERA_HEIGHT, CAMERA_TRAIL),
            target: Vec3::ZERO,
        }
    }
}

/// Ball transform: translate to the route point, spin about +Y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoverPose {
    pub position: Vec3,
    /// Spin angle in radians, [0, 2π)
    pub spin: f32,
}

impl MoverPose {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.spin)
    }
}
