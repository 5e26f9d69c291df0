use glam::{Mat4, Vec2, Vec3};
use lightlab_input::Action;
use std::f32::consts::{PI, TAU};

/// Camera state handed to a render target for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(1.0, 1.0, 2.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraView {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera controller driven by input actions and updated once per frame.
pub trait CameraControl {
    /// Buffer an input action. Nothing moves until [`CameraControl::update`].
    fn handle(&mut self, action: &Action);

    /// Advance the controller by one frame.
    fn update(&mut self);

    fn set_aspect(&mut self, aspect: f32);

    fn view(&self) -> CameraView;
}

const MIN_POLAR: f32 = 1e-4;

/// Orbit controls with damping: drags rotate the camera about its target on
/// a sphere, scrolling dollies along the view ray.
///
/// Input accumulates as a pending delta. Each update applies `damping` of
/// the pending delta and keeps the rest, so motion eases out over several
/// frames and the total applied converges to the input.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    view: CameraView,
    /// Fraction of the pending rotation applied per update.
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Viewport height in pixels; a drag of this many pixels is a full turn.
    viewport_height: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(CameraView::default())
    }
}

impl OrbitControls {
    pub fn new(view: CameraView) -> Self {
        Self {
            view,
            damping: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            viewport_height: 600.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Distance from eye to target.
    pub fn distance(&self) -> f32 {
        (self.view.eye - self.view.target).length()
    }

    /// Whether any buffered input is still being applied.
    pub fn is_settling(&self) -> bool {
        self.pending_theta.abs() > 1e-6
            || self.pending_phi.abs() > 1e-6
            || (self.pending_scale - 1.0).abs() > 1e-6
    }

    fn orbit(&mut self, delta: Vec2) {
        let per_pixel = TAU * self.rotate_speed / self.viewport_height;
        self.pending_theta -= delta.x * per_pixel;
        self.pending_phi -= delta.y * per_pixel;
    }

    fn zoom(&mut self, lines: f32) {
        self.pending_scale *= 0.95_f32.powf(lines * self.zoom_speed);
    }

    /// Eye offset from the target as (radius, theta, phi), with theta the
    /// azimuth about +Y measured from +Z and phi the polar angle from +Y.
    fn spherical(&self) -> (f32, f32, f32) {
        let offset = self.view.eye - self.view.target;
        let radius = offset.length();
        if radius == 0.0 {
            return (0.0, 0.0, PI * 0.5);
        }
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        (radius, theta, phi)
    }
}

impl CameraControl for OrbitControls {
    fn handle(&mut self, action: &Action) {
        match *action {
            Action::Orbit(delta) => self.orbit(delta),
            Action::Zoom(lines) => self.zoom(lines),
            Action::Resize { height, .. } => self.set_viewport_height(height as f32),
            Action::Noop => {}
        }
    }

    fn update(&mut self) {
        let (radius, theta, phi) = self.spherical();

        let theta = theta + self.pending_theta * self.damping;
        let phi = (phi + self.pending_phi * self.damping).clamp(MIN_POLAR, PI - MIN_POLAR);
        let radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        self.view.eye = self.view.target + offset;

        self.pending_theta *= 1.0 - self.damping;
        self.pending_phi *= 1.0 - self.damping;
        self.pending_scale = 1.0;
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.view.aspect = aspect;
    }

    fn view(&self) -> CameraView {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_view_matches_scene_setup() {
        let c = OrbitControls::default();
        let v = c.view();
        assert_eq!(v.eye, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(v.fov_degrees, 75.0);
        assert_eq!(v.near, 0.1);
        assert_eq!(v.far, 100.0);
        assert_eq!(c.damping, 0.05);
        assert!(!v.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn update_without_input_keeps_eye() {
        let mut c = OrbitControls::default();
        for _ in 0..10 {
            c.update();
        }
        assert!(close(c.view().eye, Vec3::new(1.0, 1.0, 2.0)));
        assert!(!c.is_settling());
    }

    #[test]
    fn orbit_preserves_distance_and_eases_out() {
        let mut c = OrbitControls::default();
        let d0 = c.distance();
        c.handle(&Action::Orbit(Vec2::new(60.0, 0.0)));
        c.update();
        let first = c.view().eye;
        c.update();
        let second = c.view().eye;
        assert!((c.distance() - d0).abs() < 1e-4);
        // second step is smaller than the first
        let e0 = Vec3::new(1.0, 1.0, 2.0);
        assert!((second - first).length() < (first - e0).length());
        assert!(c.is_settling());
    }

    #[test]
    fn damped_orbit_converges_to_full_delta() {
        let mut c = OrbitControls::default();
        let (_, theta0, _) = c.spherical();
        // a drag of the full viewport height is one turn; use a quarter
        c.handle(&Action::Orbit(Vec2::new(150.0, 0.0)));
        for _ in 0..600 {
            c.update();
        }
        let (_, theta, _) = c.spherical();
        let turned = (theta0 - theta).rem_euclid(TAU);
        assert!((turned - TAU * 0.25).abs() < 1e-3, "{turned}");
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut c = OrbitControls::default();
        c.damping = 1.0;
        c.handle(&Action::Orbit(Vec2::new(0.0, 5000.0)));
        c.update();
        let (_, _, phi) = c.spherical();
        assert!(phi < 0.01);
        assert!(!c.view().eye.is_nan());
        assert!(c.view().eye.y > 0.0);
    }

    #[test]
    fn zoom_dollies_toward_target() {
        let mut c = OrbitControls::default();
        let d0 = c.distance();
        c.handle(&Action::Zoom(2.0));
        c.update();
        assert!((c.distance() - d0 * 0.95_f32.powi(2)).abs() < 1e-4);
        c.handle(&Action::Zoom(-2.0));
        c.update();
        assert!((c.distance() - d0).abs() < 1e-4);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut c = OrbitControls::default();
        c.min_distance = 2.0;
        c.handle(&Action::Zoom(100.0));
        c.update();
        assert!((c.distance() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn resize_action_sets_orbit_sensitivity() {
        let mut c = OrbitControls::default();
        c.handle(&Action::Resize {
            width: 800,
            height: 1200,
            scale_factor: 1.0,
        });
        c.damping = 1.0;
        let (_, theta0, _) = c.spherical();
        c.handle(&Action::Orbit(Vec2::new(600.0, 0.0)));
        c.update();
        let (_, theta, _) = c.spherical();
        assert!(((theta0 - theta).rem_euclid(TAU) - PI).abs() < 1e-3);
    }
}
