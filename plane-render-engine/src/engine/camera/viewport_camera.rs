use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_DISTANCE, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE, ORBIT_PITCH_LIMIT, ORBIT_PITCH_SENSITIVITY, ORBIT_YAW_SENSITIVITY,
};

/// Orbit state for the single viewport camera: the camera circles
/// `focus_point` at `distance`, oriented by yaw/pitch.
#[derive(Resource)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            distance: CAMERA_START_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl ViewportCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn position(&self) -> Vec3 {
        self.focus_point + self.rotation() * Vec3::Z * self.distance
    }
}

/// Spawn the perspective camera matching the reference viewport: fov 75°,
/// near 0.1, far 1000, five units back on +Z looking at the plane centre.
pub fn spawn_viewport_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_START_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(ViewportCamera::default());
}

/// Orbit controls: left-drag orbits, right-drag pans the focus point in the
/// view plane, wheel dollies. The transform eases toward its target so
/// input feels damped.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport_camera: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        viewport_camera.yaw -= mouse_delta.x * ORBIT_YAW_SENSITIVITY;
        viewport_camera.pitch -= mouse_delta.y * ORBIT_PITCH_SENSITIVITY;
        viewport_camera.pitch = viewport_camera
            .pitch
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let rotation = viewport_camera.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let pan_speed = viewport_camera.distance * 0.0015;
        viewport_camera.focus_point +=
            (up * mouse_delta.y - right * mouse_delta.x) * pan_speed;
    }

    // Pixel and line scroll both dolly along the view direction.
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        let dolly_speed = (viewport_camera.distance * 0.2).clamp(0.1, 20.0);
        viewport_camera.distance = (viewport_camera.distance - scroll_accum * dolly_speed)
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(viewport_camera.position(), lerp_speed);
    camera_transform.rotation = camera_transform
        .rotation
        .slerp(viewport_camera.rotation(), lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_back_on_z() {
        let camera = ViewportCamera::default();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE));
    }

    #[test]
    fn orbit_position_keeps_distance() {
        let camera = ViewportCamera {
            yaw: 1.2,
            pitch: -0.7,
            ..ViewportCamera::default()
        };
        let offset = camera.position() - camera.focus_point;
        assert!((offset.length() - camera.distance).abs() < 1e-5);
    }
}
