/// Default plane extents and subdivision on startup
pub const DEFAULT_WIDTH: f32 = 11.0;
pub const DEFAULT_HEIGHT: f32 = 11.0;
pub const DEFAULT_WIDTH_SEGMENTS: u32 = 15;
pub const DEFAULT_HEIGHT_SEGMENTS: u32 = 15;

/// Calibration range shared by all four panel fields
pub const PANEL_MIN: f32 = 1.0;
pub const PANEL_MAX: f32 = 50.0;
pub const MIN_SEGMENTS: u32 = 1;
pub const MAX_SEGMENTS: u32 = 50;

/// Half-width of the per-axis jitter applied once at initial build
pub const BUILD_JITTER: f32 = 0.5;

/// Depth values on a panel rebuild are drawn uniformly from [0, DEPTH_RANGE)
pub const DEPTH_RANGE: f32 = 1.0;
