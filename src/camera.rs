//! Viewer camera that drifts with the pointer.

use glam::{Mat4, Vec2, Vec3};

/// Fraction of the remaining distance covered per frame.
const FOLLOW: f32 = 0.2;

/// Perspective camera looking at the origin from +z.
///
/// The pointer offset from the window centre picks a new camera position;
/// the camera eases toward it every frame, which gives a gentle parallax.
pub struct Camera {
    /// Current eye position.
    pub position: Vec3,
    /// Where the eye is heading.
    pub target_position: Vec3,
    /// Point the camera always faces.
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 800.0),
            target_position: Vec3::new(0.0, 0.0, 800.0),
            look_at: Vec3::ZERO,
            fov_y: 75.0,
            near: 1.0,
            far: 3000.0,
        }
    }

    /// Aim for a new eye position from a cursor position in logical pixels.
    pub fn pan_to(&mut self, cursor: Vec2, window: Vec2) {
        let offset = cursor - window / 2.0;
        self.target_position.x = -offset.x / 2.0;
        self.target_position.y = offset.y / 2.0;
    }

    /// Ease toward the pan target. Call once per frame.
    pub fn update(&mut self) {
        self.position = self.position.lerp(self.target_position, FOLLOW);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far);
        proj * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
