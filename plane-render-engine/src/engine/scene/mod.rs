/// Subdivided plane geometry with jittered vertices and a per-vertex
/// colour buffer, plus conversion into a renderable mesh asset.
pub mod plane;

/// Ray/triangle intersection queries against the plane geometry.
pub mod raycast;
