/// Orbit viewport camera resource and its per-frame controller.
pub mod viewport_camera;
