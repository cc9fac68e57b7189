use glam::{Vec2, Vec3};

// Shared scene and animation tuning constants used by the core and the web frontend.

// Scene layout
pub const OBJECT_COUNT: usize = 3;
pub const OBJECT_SPACING: f32 = 4.0; // vertical distance between consecutive section objects
pub const OBJECT_X: [f32; OBJECT_COUNT] = [-2.0, 2.0, -2.0]; // alternate left/right of the copy

// Idle spin (radians per second on x/y) and its per-object direction
pub const SPIN_RATE: Vec2 = Vec2::new(0.1, 0.12);
pub const SPIN_SIGNS: [f32; OBJECT_COUNT] = [1.0, -1.0, 1.0];

// Cursor parallax
pub const PARALLAX_AMPLITUDE: f32 = 0.5;
pub const PARALLAX_DAMPING: f32 = 5.0; // 1/s, used as `delta * damping`

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Section transitions
pub const TRANSITION_ROTATION: Vec3 = Vec3::new(6.0, 3.0, 1.5);
pub const TRANSITION_DURATION_SEC: f32 = 1.5;

// Title letters
pub const TITLE_DURATION_SEC: f32 = 0.5;
pub const TITLE_STAGGER_SEC: f32 = 0.05;
pub const BACK_OVERSHOOT: f32 = 1.70158;

// Particles
pub const PARTICLE_COUNT: usize = 200;
pub const PARTICLE_SPREAD: f32 = 10.0; // x/z extent, centred on the origin
pub const PARTICLE_SIZE: f32 = 0.03;
pub const PARTICLE_SEED: u64 = 42;

// Lighting and material
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const LIGHT_INTENSITY: f32 = 3.0;
pub const TOON_STEPS: u32 = 5;
pub const DEFAULT_MATERIAL_HEX: &str = "#ffeded";

// Mesh parameters
pub const SHAPE_RADIUS: f32 = 1.0;
pub const CAPSULE_LENGTH: f32 = 1.0;
pub const CAPSULE_CAP_SEGMENTS: u32 = 4;
pub const CAPSULE_RADIAL_SEGMENTS: u32 = 8;
