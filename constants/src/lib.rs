pub mod palette;
pub mod plane;
pub mod render_settings;
