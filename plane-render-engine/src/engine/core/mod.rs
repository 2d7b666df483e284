//! Core application setup.
//!
//! Handles the hardware capability gate, window configuration and plugin
//! initialisation for both native and WASM targets.

/// Application setup and system scheduling for the Bevy engine.
pub mod app_setup;

/// Pre-flight probe for a hardware-accelerated rendering adapter.
///
/// The only modelled failure: without an adapter the app never starts and a
/// diagnostic message is produced instead.
pub mod capability;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
