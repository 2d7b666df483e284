use bevy::prelude::*;

use super::plane::PlaneGeometry;

const INTERSECT_EPSILON: f32 = 1e-7;

/// One ray/mesh intersection: the triangle hit, its vertex indices and the
/// distance from the ray origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub triangle: usize,
    pub face: [u32; 3],
    pub distance: f32,
}

/// Nearest intersection between a ray and the plane's triangles, hits
/// ordered by ascending distance from the origin. `None` is the normal
/// no-hover case.
pub fn nearest_hit(geometry: &PlaneGeometry, origin: Vec3, direction: Vec3) -> Option<RayHit> {
    let mut nearest: Option<RayHit> = None;
    for triangle in 0..geometry.triangle_count() {
        let face = geometry.face(triangle);
        let distance = intersect_triangle(
            origin,
            direction,
            geometry.vertex(face[0]),
            geometry.vertex(face[1]),
            geometry.vertex(face[2]),
        );
        if let Some(distance) = distance {
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    triangle,
                    face,
                    distance,
                });
            }
        }
    }
    nearest
}

/// Möller–Trumbore, double sided to match the plane's material. Returns the
/// ray parameter of the hit point, forward hits only.
fn intersect_triangle(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < INTERSECT_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > INTERSECT_EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::plane::PlaneConfig;

    fn single_cell_geometry() -> PlaneGeometry {
        PlaneGeometry::flat_grid(&PlaneConfig {
            width: 2.0,
            height: 2.0,
            width_segments: 1,
            height_segments: 1,
        })
    }

    #[test]
    fn centered_ray_hits_single_cell_plane() {
        let geometry = single_cell_geometry();
        let hit = nearest_hit(&geometry, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
            .expect("centred ray must hit the plane");
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(hit.triangle < geometry.triangle_count());
        for index in hit.face {
            assert!((index as usize) < geometry.vertex_count());
        }
    }

    #[test]
    fn ray_outside_extents_misses() {
        let geometry = single_cell_geometry();
        assert!(nearest_hit(&geometry, Vec3::new(100.0, 100.0, 5.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let geometry = single_cell_geometry();
        assert!(nearest_hit(&geometry, Vec3::new(0.0, 0.0, 5.0), Vec3::X).is_none());
    }

    #[test]
    fn triangle_behind_origin_is_ignored() {
        let geometry = single_cell_geometry();
        assert!(nearest_hit(&geometry, Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn backface_hit_is_accepted() {
        // Double-sided material: approaching from -Z still hits.
        let geometry = single_cell_geometry();
        let hit = nearest_hit(&geometry, Vec3::new(0.0, 0.0, -5.0), Vec3::Z)
            .expect("backface ray must hit");
        assert!((hit.distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn nearest_of_stacked_triangles_wins() {
        // Two identical triangles at z = 0 and z = 1; the ray from z = 5
        // must report the z = 1 triangle first.
        let geometry = PlaneGeometry {
            positions: vec![
                -1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0, // far
                -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 0.0, 1.0, 1.0, // near
            ],
            colors: vec![0.0; 18],
            indices: vec![0, 1, 2, 3, 4, 5],
        };
        let hit = nearest_hit(&geometry, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
            .expect("stacked triangles must hit");
        assert_eq!(hit.triangle, 1);
        assert_eq!(hit.face, [3, 4, 5]);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn depth_randomised_plane_still_hit_through_centre() {
        use rand::SeedableRng;
        let config = PlaneConfig::default();
        let geometry =
            PlaneGeometry::rebuild(&config, &mut rand::rngs::StdRng::seed_from_u64(42));
        let hit = nearest_hit(&geometry, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
            .expect("depth jitter keeps full grid coverage in x/y");
        assert!(hit.distance > 3.0 && hit.distance < 6.0);
    }
}
