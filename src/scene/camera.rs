use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;
use crate::core::{Button, Controller, DisplayContext};

/// Keeps the camera off the poles where look-at loses its up vector
const POLAR_MARGIN: f32 = 0.01;

/// Wheel-line equivalents per second while W/S are held
const KEY_ZOOM_RATE: f32 = 5.0;

/// Radius scale per wheel line
const ZOOM_STEP: f32 = 0.95;

/// Perspective camera orbiting a target point.
///
/// Position is kept in spherical coordinates around the target: `polar` is
/// measured from +Y, `azimuth` around +Y starting at +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub orbit_speed: f32,
    pub zoom_speed: f32,
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let offset = config.position - config.target;
        let radius = offset.length().max(config.near);

        let mut camera = Self {
            target: config.target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
            orbit_speed: config.orbit_speed,
            zoom_speed: config.zoom_speed,
        };
        camera.clamp();
        camera
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Screen position in pixels (origin top-left) of a world point.
    ///
    /// `None` when the point is behind the camera or outside the depth range.
    pub fn project(&self, world: Vec3, display: &DisplayContext) -> Option<Vec2> {
        project_with(&self.view_projection(), world, display)
    }

    /// Turn around the target by `azimuth` and `polar` radians
    pub fn orbit(&mut self, azimuth: f32, polar: f32) {
        self.azimuth = (self.azimuth + azimuth).rem_euclid(TAU);
        self.polar += polar;
        self.clamp();
    }

    /// Positive steps move towards the target
    pub fn zoom(&mut self, steps: f32) {
        self.radius *= ZOOM_STEP.powf(steps * self.zoom_speed);
        self.clamp();
    }

    /// Apply one frame of input: left-drag orbits, scroll and W/S zoom, Q/E orbit
    pub fn update(&mut self, delta: f32, display: &DisplayContext, controller: &dyn Controller) {
        let height = display.height.max(1) as f32;

        if controller.is_down(Button::MouseLeft) {
            let (dx, dy) = controller.pointer_delta();
            // A full-height drag turns the camera once around
            let scale = TAU / height * self.orbit_speed;
            self.orbit(-dx * scale, -dy * scale);
        }

        let key_orbit = match (controller.is_down(Button::KeyQ), controller.is_down(Button::KeyE)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        if key_orbit != 0.0 {
            self.orbit(key_orbit * self.orbit_speed * delta, 0.0);
        }

        let key_zoom = match (controller.is_down(Button::KeyW), controller.is_down(Button::KeyS)) {
            (true, false) => KEY_ZOOM_RATE * delta,
            (false, true) => -KEY_ZOOM_RATE * delta,
            _ => 0.0,
        };
        let steps = controller.scroll_delta() + key_zoom;
        if steps != 0.0 {
            self.zoom(steps);
        }
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(POLAR_MARGIN, PI - POLAR_MARGIN);
        self.radius = self.radius.clamp(self.near * 10.0, self.far * 0.5);
    }
}

/// Project through a precomputed view-projection matrix
pub fn project_with(view_projection: &Mat4, world: Vec3, display: &DisplayContext) -> Option<Vec2> {
    let clip = *view_projection * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }

    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }

    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * display.width as f32,
        (1.0 - ndc.y) * 0.5 * display.height as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoInput;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), 800.0 / 600.0)
    }

    struct Dragging {
        delta: (f32, f32),
    }

    impl Controller for Dragging {
        fn is_down(&self, button: Button) -> bool {
            button == Button::MouseLeft
        }
        fn get_down_keys(&self) -> &[Button] {
            &[Button::MouseLeft]
        }
        fn pointer_delta(&self) -> (f32, f32) {
            self.delta
        }
    }

    #[test]
    fn spherical_round_trip() {
        let cam = camera();
        assert!(cam.position().distance(Vec3::new(0.0, 50.0, 100.0)) < 1e-3);
    }

    #[test]
    fn target_projects_to_center() {
        let cam = camera();
        let display = DisplayContext::new(800, 600);
        let p = cam.project(cam.target, &display).unwrap();
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-2);
    }

    #[test]
    fn points_behind_are_culled() {
        let cam = camera();
        let display = DisplayContext::new(800, 600);
        let behind = cam.position() + (cam.position() - cam.target);
        assert!(cam.project(behind, &display).is_none());
    }

    #[test]
    fn drag_orbits_and_keeps_radius() {
        let mut cam = camera();
        let display = DisplayContext::new(800, 600);
        let radius = cam.radius;
        cam.update(0.016, &display, &Dragging { delta: (150.0, 0.0) });

        assert!((cam.azimuth - (TAU - TAU * 0.25)).abs() < 1e-4);
        assert!((cam.position().distance(cam.target) - radius).abs() < 1e-3);
    }

    #[test]
    fn polar_is_clamped() {
        let mut cam = camera();
        cam.orbit(0.0, -10.0);
        assert_eq!(cam.polar, POLAR_MARGIN);
        cam.orbit(0.0, 20.0);
        assert_eq!(cam.polar, PI - POLAR_MARGIN);
    }

    #[test]
    fn zoom_moves_closer() {
        let mut cam = camera();
        let before = cam.radius;
        cam.zoom(1.0);
        assert!(cam.radius < before);
        cam.zoom(-2.0);
        assert!(cam.radius > before);
    }

    #[test]
    fn idle_input_changes_nothing() {
        let mut cam = camera();
        let before = cam.clone();
        cam.update(0.5, &DisplayContext::new(800, 600), &NoInput);
        assert_eq!(cam, before);
    }

    #[test]
    fn aspect_ignores_degenerate_values() {
        let mut cam = camera();
        cam.set_aspect(0.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect, 800.0 / 600.0);
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect, 2.0);
    }
}
