use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use rand::Rng;

use constants::palette::BASE_TONE;
use constants::plane::{
    BUILD_JITTER, DEFAULT_HEIGHT, DEFAULT_HEIGHT_SEGMENTS, DEFAULT_WIDTH, DEFAULT_WIDTH_SEGMENTS,
    DEPTH_RANGE, MAX_SEGMENTS, MIN_SEGMENTS, PANEL_MAX, PANEL_MIN,
};

/// Plane extents and subdivision counts, mutated only by the parameter panel.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            width_segments: DEFAULT_WIDTH_SEGMENTS,
            height_segments: DEFAULT_HEIGHT_SEGMENTS,
        }
    }
}

impl PlaneConfig {
    /// All four fields bounded to the panel calibration range.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.clamp(PANEL_MIN, PANEL_MAX),
            height: self.height.clamp(PANEL_MIN, PANEL_MAX),
            width_segments: self.width_segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
            height_segments: self.height_segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
        }
    }

    pub fn vertex_count(&self) -> usize {
        ((self.width_segments + 1) * (self.height_segments + 1)) as usize
    }
}

/// Flat vertex buffers for the subdivided plane. Positions and colours are
/// parallel, stride 3, one entry per grid vertex.
pub struct PlaneGeometry {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    /// Regular grid centred on the origin in the XY plane, no jitter,
    /// colours at the base tone.
    pub fn flat_grid(config: &PlaneConfig) -> Self {
        let ws = config.width_segments;
        let hs = config.height_segments;
        let vertex_count = config.vertex_count();

        let mut positions = Vec::with_capacity(vertex_count * 3);
        for iy in 0..=hs {
            let y = (iy as f32 / hs as f32) * config.height - config.height / 2.0;
            for ix in 0..=ws {
                let x = (ix as f32 / ws as f32) * config.width - config.width / 2.0;
                positions.extend_from_slice(&[x, y, 0.0]);
            }
        }

        // Two counter-clockwise triangles per grid cell, facing +Z.
        let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * (ws + 1) + ix;
                let b = a + 1;
                let c = a + (ws + 1);
                let d = c + 1;
                indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }

        let mut geometry = Self {
            positions,
            colors: Vec::new(),
            indices,
        };
        geometry.reset_colors();
        geometry
    }

    /// Initial build: independent jitter in [-BUILD_JITTER, BUILD_JITTER)
    /// on all three axes of every vertex.
    pub fn build(config: &PlaneConfig, rng: &mut impl Rng) -> Self {
        let mut geometry = Self::flat_grid(config);
        for value in geometry.positions.iter_mut() {
            *value += rng.random_range(-BUILD_JITTER..BUILD_JITTER);
        }
        geometry
    }

    /// Panel rebuild: fresh grid for the new configuration with only the
    /// depth axis randomised, uniformly in [0, DEPTH_RANGE).
    pub fn rebuild(config: &PlaneConfig, rng: &mut impl Rng) -> Self {
        let mut geometry = Self::flat_grid(config);
        for vertex in geometry.positions.chunks_exact_mut(3) {
            vertex[2] = rng.random_range(0.0..DEPTH_RANGE);
        }
        geometry
    }

    /// Fill the colour buffer with the base tone, one RGB triple per vertex.
    pub fn reset_colors(&mut self) {
        let vertex_count = self.positions.len() / 3;
        self.colors.clear();
        for _ in 0..vertex_count {
            self.colors.extend_from_slice(&BASE_TONE);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of one triangle.
    pub fn face(&self, triangle: usize) -> [u32; 3] {
        let base = triangle * 3;
        [
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        ]
    }

    pub fn vertex(&self, index: u32) -> Vec3 {
        let base = index as usize * 3;
        Vec3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    /// Write one vertex colour. Out-of-range indices are ignored so that a
    /// fade started before a rebuild cannot write past the new buffer.
    pub fn set_color(&mut self, index: u32, rgb: [f32; 3]) {
        let base = index as usize * 3;
        if base + 3 <= self.colors.len() {
            self.colors[base..base + 3].copy_from_slice(&rgb);
        }
    }

    pub fn color(&self, index: u32) -> [f32; 3] {
        let base = index as usize * 3;
        [
            self.colors[base],
            self.colors[base + 1],
            self.colors[base + 2],
        ]
    }

    fn positions_vec3(&self) -> Vec<[f32; 3]> {
        self.positions
            .chunks_exact(3)
            .map(|v| [v[0], v[1], v[2]])
            .collect()
    }

    /// Colour attribute data, RGB widened with an opaque alpha.
    pub fn colors_rgba(&self) -> Vec<[f32; 4]> {
        self.colors
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2], 1.0])
            .collect()
    }

    fn uvs(&self, config: &PlaneConfig) -> Vec<[f32; 2]> {
        let ws = config.width_segments;
        let hs = config.height_segments;
        let mut uvs = Vec::with_capacity(self.vertex_count());
        for iy in 0..=hs {
            for ix in 0..=ws {
                uvs.push([ix as f32 / ws as f32, 1.0 - iy as f32 / hs as f32]);
            }
        }
        uvs
    }

    /// Convert into a renderable mesh. Kept in both worlds so the colour
    /// attribute can be rewritten per frame from the main world.
    pub fn to_mesh(&self, config: &PlaneConfig) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions_vec3());
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs(config));
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors_rgba());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh.compute_smooth_normals();
        mesh
    }
}

/// Marker for the plane entity.
#[derive(Component)]
pub struct HoverPlane;

/// The single shared plane: canonical geometry plus the mesh asset handle
/// its buffers are uploaded under.
#[derive(Resource)]
pub struct TerrainPlane {
    pub geometry: PlaneGeometry,
    pub mesh: Handle<Mesh>,
}

/// Build the plane and attach it to the scene.
pub fn spawn_plane(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    config: &PlaneConfig,
) {
    let config = config.clamped();
    let geometry = PlaneGeometry::build(&config, &mut rand::rng());
    let mesh = meshes.add(geometry.to_mesh(&config));

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 1.0,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        HoverPlane,
    ));

    println!(
        "Plane spawned: {} vertices, {} triangles",
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    commands.insert_resource(TerrainPlane { geometry, mesh });
}

/// Re-upload the colour attribute after per-frame colour mutation.
pub fn upload_colors(plane: &TerrainPlane, meshes: &mut Assets<Mesh>) {
    if let Some(mesh) = meshes.get_mut(&plane.mesh) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, plane.geometry.colors_rgba());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn default_rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn buffers_match_vertex_count_for_reference_config() {
        // {11, 11, 15, 15} -> 16x16 grid
        let config = PlaneConfig::default();
        let geometry = PlaneGeometry::build(&config, &mut default_rng());
        assert_eq!(geometry.vertex_count(), 256);
        assert_eq!(geometry.positions.len(), 768);
        assert_eq!(geometry.colors.len(), 768);
        assert_eq!(geometry.triangle_count(), 15 * 15 * 2);
    }

    #[test]
    fn color_buffer_tracks_configured_grid() {
        for (ws, hs) in [(1, 1), (3, 7), (50, 50)] {
            let config = PlaneConfig {
                width_segments: ws,
                height_segments: hs,
                ..PlaneConfig::default()
            };
            let geometry = PlaneGeometry::rebuild(&config, &mut default_rng());
            assert_eq!(geometry.colors.len(), 3 * ((ws + 1) * (hs + 1)) as usize);
            assert_eq!(geometry.colors.len(), geometry.positions.len());
        }
    }

    #[test]
    fn single_cell_plane_has_four_vertices() {
        let config = PlaneConfig {
            width_segments: 1,
            height_segments: 1,
            ..PlaneConfig::default()
        };
        let geometry = PlaneGeometry::flat_grid(&config);
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.triangle_count(), 2);
        for triangle in 0..2 {
            for index in geometry.face(triangle) {
                assert!((index as usize) < geometry.vertex_count());
            }
        }
    }

    #[test]
    fn initial_build_jitters_every_axis_within_half() {
        let config = PlaneConfig::default();
        let flat = PlaneGeometry::flat_grid(&config);
        let jittered = PlaneGeometry::build(&config, &mut default_rng());
        let mut moved = 0usize;
        for (a, b) in flat.positions.iter().zip(&jittered.positions) {
            let offset = b - a;
            assert!(offset >= -BUILD_JITTER && offset < BUILD_JITTER);
            if offset != 0.0 {
                moved += 1;
            }
        }
        assert!(moved > flat.positions.len() / 2);
    }

    #[test]
    fn rebuild_randomizes_depth_only() {
        let config = PlaneConfig::default();
        let flat = PlaneGeometry::flat_grid(&config);
        let rebuilt = PlaneGeometry::rebuild(&config, &mut default_rng());
        for (a, b) in flat
            .positions
            .chunks_exact(3)
            .zip(rebuilt.positions.chunks_exact(3))
        {
            assert_eq!(a[0], b[0]);
            assert_eq!(a[1], b[1]);
            assert!(b[2] >= 0.0 && b[2] < DEPTH_RANGE);
        }
    }

    #[test]
    fn reset_colors_is_idempotent() {
        let config = PlaneConfig::default();
        let mut geometry = PlaneGeometry::build(&config, &mut default_rng());
        geometry.set_color(0, [1.0, 0.0, 0.0]);
        geometry.reset_colors();
        let once = geometry.colors.clone();
        geometry.reset_colors();
        assert_eq!(once, geometry.colors);
        assert_eq!(geometry.color(0), BASE_TONE);
    }

    #[test]
    fn config_clamps_to_panel_range() {
        let config = PlaneConfig {
            width: 0.1,
            height: 900.0,
            width_segments: 0,
            height_segments: 77,
        }
        .clamped();
        assert_eq!(config.width, PANEL_MIN);
        assert_eq!(config.height, PANEL_MAX);
        assert_eq!(config.width_segments, MIN_SEGMENTS);
        assert_eq!(config.height_segments, MAX_SEGMENTS);
    }

    #[test]
    fn out_of_range_color_write_is_ignored() {
        let config = PlaneConfig {
            width_segments: 1,
            height_segments: 1,
            ..PlaneConfig::default()
        };
        let mut geometry = PlaneGeometry::flat_grid(&config);
        let before = geometry.colors.clone();
        geometry.set_color(100, [0.0, 0.0, 0.0]);
        assert_eq!(before, geometry.colors);
    }
}
