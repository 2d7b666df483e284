//! Interactive tools for the jagged-plane viewport.
//!
//! Provides the hover-highlight engine and the parameter panel, both
//! operating on the shared `TerrainPlane` resource.
//!
//! ## Hover Highlight (`tools::hover`)
//! - Pointer position tracked in normalised device coordinates, `None`
//!   until the first cursor movement
//! - Each frame a ray is cast from the camera through the pointer and
//!   intersected against the plane's triangles; the nearest face wins
//! - The hit face's three vertices flash to the highlight tone, then an
//!   independent fade transition eases them back to the base tone
//! - Retriggering a face mid-fade layers a new transition on top of the
//!   old one; each transition runs to completion on its own clock
//!
//! ## Parameter Panel (`tools::panel`)
//! - Four bounded numeric fields: width, height, width segments, height
//!   segments, each clamped to [1, 50]
//! - Every discrete change rebuilds the plane geometry in the same frame:
//!   fresh grid, re-randomised depth, colours reset to the base tone
//! - The mesh asset is replaced in place under its existing handle so the
//!   previous geometry's GPU buffers are released

/// Hover-highlight engine: pointer tracking, per-frame raycast and the
/// fade-transition pool.
pub mod hover;

/// Parameter panel bound to the plane configuration, with synchronous
/// geometry rebuild on change.
pub mod panel;
