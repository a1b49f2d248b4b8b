//! Camera plugin for the top-down view.
//!
//! Provides Z/X height-style zoom, C/V orbit rotation, and mouse
//! wheel zoom. Camera state is client-side only and never touches the
//! simulation.

use bevy::prelude::*;

/// Plugin for top-down camera control.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (camera_zoom, camera_rotate, camera_wheel_zoom));
    }
}

/// Settings for camera behavior.
#[derive(Resource)]
pub struct CameraSettings {
    /// Zoom applied per Z/X key press.
    pub zoom_step: f32,
    /// Mouse wheel zoom speed multiplier.
    pub wheel_zoom_speed: f32,
    /// Minimum zoom level (most zoomed in).
    pub min_zoom: f32,
    /// Maximum zoom level (most zoomed out).
    pub max_zoom: f32,
    /// Degrees of orbit applied per C/V key press.
    pub rotate_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom_step: 0.05,
            wheel_zoom_speed: 0.1,
            min_zoom: 0.5,
            max_zoom: 3.0,
            rotate_step: 6.0,
        }
    }
}

/// Marker component for the main game camera.
#[derive(Component)]
pub struct MainCamera;

/// Spawns the main 2D camera, zoomed out far enough to frame the
/// whole arena.
fn spawn_camera(mut commands: Commands) {
    let mut bundle = Camera2dBundle::default();
    bundle.transform.scale = Vec3::splat(1.6);
    commands.spawn((bundle, MainCamera));
}

/// Z/X step the zoom, standing in for raising and lowering the
/// camera.
fn camera_zoom(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    let mut delta = 0.0;
    if keyboard.pressed(KeyCode::KeyZ) {
        delta -= settings.zoom_step;
    }
    if keyboard.pressed(KeyCode::KeyX) {
        delta += settings.zoom_step;
    }
    if delta != 0.0 {
        let new_scale =
            (transform.scale.x + delta).clamp(settings.min_zoom, settings.max_zoom);
        transform.scale = Vec3::splat(new_scale);
    }
}

/// C/V orbit the view around the arena center.
fn camera_rotate(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    let mut degrees = 0.0;
    if keyboard.pressed(KeyCode::KeyC) {
        degrees -= settings.rotate_step;
    }
    if keyboard.pressed(KeyCode::KeyV) {
        degrees += settings.rotate_step;
    }
    if degrees != 0.0 {
        transform.rotate_z(degrees.to_radians());
    }
}

/// Handles mouse wheel zoom.
fn camera_wheel_zoom(
    mut scroll_events: EventReader<bevy::input::mouse::MouseWheel>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let zoom_delta = -event.y * settings.wheel_zoom_speed;
        let new_scale =
            (transform.scale.x + zoom_delta).clamp(settings.min_zoom, settings.max_zoom);
        transform.scale = Vec3::splat(new_scale);
    }
}
