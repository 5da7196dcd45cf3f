// crates/engine_core/src/camera.rs

use engine_shared::MovementInput;
use glam::{Vec2, Vec3};

const BASE_SPEED: f32 = 5.0;
const SLOW_FACTOR: f32 = 0.25;
const FAST_FACTOR: f32 = 4.0;
const PITCH_LIMIT_DEG: f32 = 89.0;

pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_FIELD_OF_VIEW: f32 = 90.0;

/// The part of a camera that live configuration may change.
pub trait CameraSettings {
    fn set_sensitivity(&mut self, sensitivity: f32);
    fn set_field_of_view(&mut self, fov_degrees: f32);
}

/// A camera the mode arbiter can freeze and the frame driver can move.
pub trait CameraRig: CameraSettings {
    fn freeze(&mut self);
    fn unfreeze(&mut self);
    fn is_frozen(&self) -> bool;
    /// Integrates movement and mouse look. Does nothing while frozen.
    fn update(&mut self, movement: &MovementInput, look_delta: Vec2, dt: f32);
}

/// Free-flying first person camera.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    pub position: Vec3,
    /// Degrees, 0 looks down -Z.
    pub yaw: f32,
    /// Degrees, clamped to +-89.
    pub pitch: f32,
    sensitivity: f32,
    fov_degrees: f32,
    viewport: (u32, u32),
    frozen: bool,
}

impl FpsCamera {
    /// Starts frozen; the arbiter unfreezes it once camera control is entered.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0,
            pitch: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
            fov_degrees: DEFAULT_FIELD_OF_VIEW,
            viewport: (width_px.max(1), height_px.max(1)),
            frozen: true,
        }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn field_of_view(&self) -> f32 {
        self.fov_degrees
    }

    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.viewport = (width_px.max(1), height_px.max(1));
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    fn apply_look(&mut self, look_delta: Vec2) {
        self.yaw += look_delta.x * self.sensitivity;
        self.pitch = (self.pitch - look_delta.y * self.sensitivity)
            .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    fn apply_movement(&mut self, movement: &MovementInput, dt: f32) {
        let front = self.front();
        let right = front.cross(Vec3::Y).normalize_or_zero();

        let mut direction = Vec3::ZERO;
        if movement.forward {
            direction += front;
        }
        if movement.back {
            direction -= front;
        }
        if movement.right {
            direction += right;
        }
        if movement.left {
            direction -= right;
        }
        if movement.up {
            direction += Vec3::Y;
        }
        if movement.down {
            direction -= Vec3::Y;
        }

        let mut speed = BASE_SPEED;
        if movement.slow {
            speed *= SLOW_FACTOR;
        }
        if movement.fast {
            speed *= FAST_FACTOR;
        }

        self.position += direction.normalize_or_zero() * speed * dt;
    }
}

impl CameraSettings for FpsCamera {
    fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    fn set_field_of_view(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
    }
}

impl CameraRig for FpsCamera {
    fn freeze(&mut self) {
        self.frozen = true;
    }

    fn unfreeze(&mut self) {
        self.frozen = false;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn update(&mut self, movement: &MovementInput, look_delta: Vec2, dt: f32) {
        if self.frozen {
            return;
        }
        self.apply_look(look_delta);
        self.apply_movement(movement, dt);
    }
}
