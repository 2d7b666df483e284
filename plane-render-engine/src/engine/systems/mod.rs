/// FPS overlay text refresh from the frame time diagnostics.
pub mod fps_tracking;
