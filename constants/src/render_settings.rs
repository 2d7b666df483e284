/// Perspective projection parameters matching the reference viewport
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Camera starts this far back on +Z, looking at the plane centre
pub const CAMERA_START_DISTANCE: f32 = 5.0;

pub const ORBIT_YAW_SENSITIVITY: f32 = 0.0035;
pub const ORBIT_PITCH_SENSITIVITY: f32 = 0.0030;
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 200.0;

/// Directional light brightness for the facing/back light pair
pub const LIGHT_ILLUMINANCE: f32 = 10_000.0;
