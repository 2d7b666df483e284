use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use constants::palette::{BASE_TONE, FADE_DURATION_SECS, HIGHLIGHT_TONE};

use crate::engine::scene::plane::{TerrainPlane, upload_colors};
use crate::engine::scene::raycast::nearest_hit;

/// Pointer position in both window pixels and normalised device
/// coordinates. `None` until the first movement event arrives.
#[derive(Resource, Default)]
pub struct PointerState {
    pub ndc: Option<Vec2>,
    pub viewport: Option<Vec2>,
}

/// One in-flight colour interpolation, bound to the vertex triple of the
/// face that was hovered when it started.
pub struct FadeTransition {
    pub vertices: [u32; 3],
    pub elapsed: f32,
}

impl FadeTransition {
    /// Interpolated tone for the current clock: the highlight tone easing
    /// out toward the base tone.
    pub fn tone(&self) -> [f32; 3] {
        let progress = (self.elapsed / FADE_DURATION_SECS).clamp(0.0, 1.0);
        let eased = EasingCurve::new(0.0, 1.0, EaseFunction::CubicOut).sample_clamped(progress);
        [
            HIGHLIGHT_TONE[0] + (BASE_TONE[0] - HIGHLIGHT_TONE[0]) * eased,
            HIGHLIGHT_TONE[1] + (BASE_TONE[1] - HIGHLIGHT_TONE[1]) * eased,
            HIGHLIGHT_TONE[2] + (BASE_TONE[2] - HIGHLIGHT_TONE[2]) * eased,
        ]
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= FADE_DURATION_SECS
    }
}

/// Pool of active fades. Transitions are independent; a face hovered again
/// mid-fade simply gains another entry, and insertion order makes the
/// newest transition write last each frame.
#[derive(Resource, Default)]
pub struct ActiveFades {
    pub transitions: Vec<FadeTransition>,
}

impl ActiveFades {
    pub fn start(&mut self, vertices: [u32; 3]) {
        self.transitions.push(FadeTransition {
            vertices,
            elapsed: 0.0,
        });
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

/// Viewport pixels to normalised device coordinates:
/// `x' = (px/w)*2 - 1`, `y' = -(py/h)*2 + 1`.
pub fn ndc_from_viewport(position: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (position.x / width) * 2.0 - 1.0,
        -(position.y / height) * 2.0 + 1.0,
    )
}

/// Coordinates outside [-1, 1] are off canvas and never hover anything.
pub fn on_canvas(ndc: Vec2) -> bool {
    ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0
}

/// Track the pointer in normalised device coordinates.
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    for cursor in cursor_moved.read() {
        let (width, height) = (window.width(), window.height());
        if width <= 0.0 || height <= 0.0 {
            continue;
        }
        pointer.viewport = Some(cursor.position);
        pointer.ndc = Some(ndc_from_viewport(cursor.position, width, height));
    }
}

/// Per-frame hover step: cast a ray through the pointer, flash the nearest
/// face to the highlight tone and start its fade-out. No pointer or no hit
/// means no colour mutation this frame.
pub fn hover_highlight_system(
    pointer: Res<PointerState>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    plane: Option<ResMut<TerrainPlane>>,
    mut fades: ResMut<ActiveFades>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut plane) = plane else {
        return;
    };
    let (Some(ndc), Some(viewport)) = (pointer.ndc, pointer.viewport) else {
        return;
    };
    if !on_canvas(ndc) {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, viewport) else {
        return;
    };

    let Some(hit) = nearest_hit(&plane.geometry, ray.origin, *ray.direction) else {
        return;
    };

    for &vertex in &hit.face {
        plane.geometry.set_color(vertex, HIGHLIGHT_TONE);
    }
    upload_colors(&plane, &mut meshes);
    fades.start(hit.face);
}

/// Advance every fade by the frame delta, writing the interpolated tone
/// into its vertex slots. Completed fades land exactly on the base tone
/// and are dropped.
pub fn advance_fade_transitions(
    time: Res<Time>,
    mut fades: ResMut<ActiveFades>,
    plane: Option<ResMut<TerrainPlane>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut plane) = plane else {
        return;
    };
    if fades.transitions.is_empty() {
        return;
    }

    let delta = time.delta_secs();
    for transition in &mut fades.transitions {
        transition.elapsed += delta;
        let tone = transition.tone();
        for &vertex in &transition.vertices {
            plane.geometry.set_color(vertex, tone);
        }
    }
    fades.transitions.retain(|transition| !transition.finished());
    upload_colors(&plane, &mut meshes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::plane::{PlaneConfig, PlaneGeometry};

    #[test]
    fn fresh_transition_starts_at_highlight_tone() {
        let transition = FadeTransition {
            vertices: [0, 1, 2],
            elapsed: 0.0,
        };
        assert_eq!(transition.tone(), HIGHLIGHT_TONE);
        assert!(!transition.finished());
    }

    #[test]
    fn fade_completes_to_base_tone() {
        let transition = FadeTransition {
            vertices: [0, 1, 2],
            elapsed: FADE_DURATION_SECS,
        };
        let tone = transition.tone();
        for (value, base) in tone.iter().zip(&BASE_TONE) {
            assert!((value - base).abs() < 1e-6);
        }
        assert!(transition.finished());
    }

    #[test]
    fn fade_moves_monotonically_toward_base() {
        let mut previous = FadeTransition {
            vertices: [0, 1, 2],
            elapsed: 0.0,
        }
        .tone()[0];
        for step in 1..=10 {
            let tone = FadeTransition {
                vertices: [0, 1, 2],
                elapsed: FADE_DURATION_SECS * step as f32 / 10.0,
            }
            .tone();
            // Red channel falls from 1.0 to 0.8.
            assert!(tone[0] <= previous + 1e-6);
            previous = tone[0];
        }
    }

    #[test]
    fn highlight_write_is_exact() {
        let config = PlaneConfig::default();
        let mut geometry = PlaneGeometry::flat_grid(&config);
        let face = geometry.face(0);
        for &vertex in &face {
            geometry.set_color(vertex, HIGHLIGHT_TONE);
        }
        for &vertex in &face {
            assert_eq!(geometry.color(vertex), HIGHLIGHT_TONE);
        }
        // Vertices outside the face keep the base tone.
        let untouched = (0..geometry.vertex_count() as u32)
            .find(|index| !face.contains(index))
            .unwrap();
        assert_eq!(geometry.color(untouched), BASE_TONE);
    }

    #[test]
    fn ndc_conversion_matches_reference_formula() {
        let (width, height) = (800.0, 600.0);
        assert_eq!(
            ndc_from_viewport(Vec2::new(0.0, 0.0), width, height),
            Vec2::new(-1.0, 1.0)
        );
        assert_eq!(
            ndc_from_viewport(Vec2::new(width, height), width, height),
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(
            ndc_from_viewport(Vec2::new(width / 2.0, height / 2.0), width, height),
            Vec2::ZERO
        );
    }

    #[test]
    fn off_canvas_coordinates_are_rejected() {
        assert!(on_canvas(Vec2::ZERO));
        assert!(on_canvas(Vec2::new(1.0, -1.0)));
        assert!(!on_canvas(Vec2::new(1.2, 0.0)));
        assert!(!on_canvas(Vec2::new(0.0, -1.01)));
    }

    #[test]
    fn retriggered_face_layers_a_second_transition() {
        let mut fades = ActiveFades::default();
        fades.start([0, 1, 2]);
        fades.start([0, 1, 2]);
        assert_eq!(fades.transitions.len(), 2);
        fades.clear();
        assert!(fades.transitions.is_empty());
    }
}
