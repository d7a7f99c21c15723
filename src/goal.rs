//! Static goal frame
//!
//! The goal sits at the origin facing +Z, where every route ends. Parts are
//! plain primitives with world transforms; meshing and materials are the
//! renderer's business.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Half the distance between the posts
pub const GOAL_HALF_WIDTH: f32 = 60.0;
pub const POST_HEIGHT: f32 = 40.0;
pub const CROSSBAR_LENGTH: f32 = 120.0;
pub const CROSSBAR_Y: f32 = 19.5;
/// Back supports run from the crossbar down to the ground behind the goal
pub const SUPPORT_LENGTH: f32 = 46.2;
pub const SUPPORT_LEAN_DEG: f32 = 30.0;
pub const SUPPORT_Z: f32 = -11.5;
/// Depth of the side nets at ground level
pub const NET_DEPTH: f32 = 23.1;
pub const BAR_RADIUS: f32 = 1.0;

/// Primitive shape, centered on its local origin like the renderer's meshes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalShape {
    /// Cylinder along local +Y
    Cylinder { radius: f32, height: f32 },
    /// Plane in local XY
    Plane { width: f32, height: f32 },
    /// Right triangle in local XY with the right angle at the origin
    RightTriangle { base: f32, height: f32 },
    /// Torus in local XY
    Torus { radius: f32, tube: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalMaterial {
    /// Solid white frame
    Frame,
    /// Translucent double-sided net
    Net,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalPart {
    pub name: &'static str,
    pub shape: GoalShape,
    pub material: GoalMaterial,
    /// Local -> world
    pub transform: Mat4,
}

fn bar(height: f32) -> GoalShape {
    GoalShape::Cylinder {
        radius: BAR_RADIUS,
        height,
    }
}

fn ring() -> GoalShape {
    GoalShape::Torus {
        radius: BAR_RADIUS,
        tube: BAR_RADIUS,
    }
}

fn leaning_back(x: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, 0.0, SUPPORT_Z))
        * Mat4::from_rotation_x(SUPPORT_LEAN_DEG.to_radians())
}

/// Foot ring at the bottom end of a bar of the given length
fn foot_ring(parent: Mat4, length: f32, tilt_deg: f32) -> Mat4 {
    parent
        * Mat4::from_translation(Vec3::new(0.0, -length / 2.0, 0.0))
        * Mat4::from_rotation_x(tilt_deg.to_radians())
}

/// All parts of the goal frame and nets
pub fn goal_frame() -> Vec<GoalPart> {
    let frame = |name, shape, transform| GoalPart {
        name,
        shape,
        material: GoalMaterial::Frame,
        transform,
    };
    let net = |name, shape, transform| GoalPart {
        name,
        shape,
        material: GoalMaterial::Net,
        transform,
    };

    let right_post = Mat4::from_translation(Vec3::new(GOAL_HALF_WIDTH, 0.0, 0.0));
    let left_post = Mat4::from_translation(Vec3::new(-GOAL_HALF_WIDTH, 0.0, 0.0));
    let right_support = leaning_back(GOAL_HALF_WIDTH);
    let left_support = leaning_back(-GOAL_HALF_WIDTH);
    let side_net = |x: f32| {
        Mat4::from_translation(Vec3::new(x, -POST_HEIGHT / 2.0, 0.0))
            * Mat4::from_rotation_y(90f32.to_radians())
    };
    let upright_tilt = 90.0;
    let support_tilt = 90.0 - SUPPORT_LEAN_DEG;

    vec![
        frame("right_post", bar(POST_HEIGHT), right_post),
        frame("left_post", bar(POST_HEIGHT), left_post),
        frame(
            "crossbar",
            bar(CROSSBAR_LENGTH),
            Mat4::from_translation(Vec3::new(0.0, CROSSBAR_Y, 0.0))
                * Mat4::from_rotation_z(90f32.to_radians()),
        ),
        frame("right_support", bar(SUPPORT_LENGTH), right_support),
        frame("left_support", bar(SUPPORT_LENGTH), left_support),
        net(
            "back_net",
            GoalShape::Plane {
                width: CROSSBAR_LENGTH,
                height: SUPPORT_LENGTH,
            },
            leaning_back(0.0),
        ),
        net(
            "left_net",
            GoalShape::RightTriangle {
                base: NET_DEPTH,
                height: POST_HEIGHT,
            },
            side_net(-GOAL_HALF_WIDTH),
        ),
        net(
            "right_net",
            GoalShape::RightTriangle {
                base: NET_DEPTH,
                height: POST_HEIGHT,
            },
            side_net(GOAL_HALF_WIDTH),
        ),
        frame(
            "right_post_ring",
            ring(),
            foot_ring(right_post, POST_HEIGHT, upright_tilt),
        ),
        frame(
            "left_post_ring",
            ring(),
            foot_ring(left_post, POST_HEIGHT, upright_tilt),
        ),
        frame(
            "right_support_ring",
            ring(),
            foot_ring(right_support, SUPPORT_LENGTH, support_tilt),
        ),
        frame(
            "left_support_ring",
            ring(),
            foot_ring(left_support, SUPPORT_LENGTH, support_tilt),
        ),
    ]
}
