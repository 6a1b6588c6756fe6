use glam::{Mat4, Vec3, Vec4};
use shared::RoomDimensions;

use crate::config::CameraConfig;
use crate::transform::CoordinateTransform;
use crate::viewport::picking::Ray;

/// Where the rig starts and how far it may move
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSetup {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_deg: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraSetup {
    /// Target the room's horizontal center at the configured eye height
    pub fn for_room(
        room: &RoomDimensions,
        config: &CameraConfig,
        transform: &CoordinateTransform,
    ) -> Self {
        let (w, d) = transform.room_scene_size(room);
        Self {
            eye: Vec3::from_array(config.initial_eye),
            target: Vec3::new(w / 2.0, config.target_height, d / 2.0),
            fov_deg: config.fov_deg,
            min_polar: config.min_polar,
            max_polar: config.max_polar,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            damping: config.damping,
            near: config.near,
            far: config.far,
        }
    }
}

/// Smallest polar angle; straight down makes the look-at basis degenerate
const POLAR_EPSILON: f32 = 1e-4;

/// Orbit camera with damped rotate/pan and clamped polar angle and distance
#[derive(Debug, Clone)]
pub struct OrbitRig {
    setup: CameraSetup,
    /// Angle around +Y, measured from +Z (radians)
    pub azimuth: f32,
    /// Angle from +Y (radians)
    pub polar: f32,
    pub distance: f32,
    pub target: Vec3,
    /// Motion still to be applied by `update`
    pending_azimuth: f32,
    pending_polar: f32,
    pending_pan: Vec3,
}

impl OrbitRig {
    pub fn new(setup: CameraSetup) -> Self {
        let mut rig = Self {
            setup,
            azimuth: 0.0,
            polar: 0.0,
            distance: 0.0,
            target: Vec3::ZERO,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: Vec3::ZERO,
        };
        rig.reset();
        rig
    }

    /// Back to the initial eye and target
    pub fn reset(&mut self) {
        let offset = self.setup.eye - self.setup.target;
        self.target = self.setup.target;
        self.distance = offset.length();
        self.azimuth = offset.x.atan2(offset.z);
        self.polar = if self.distance > 0.0 {
            (offset.y / self.distance).clamp(-1.0, 1.0).acos()
        } else {
            self.setup.max_polar
        };
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.clamp();
    }

    /// Replace limits and initial pose, keeping nothing of the current pose
    pub fn set_setup(&mut self, setup: CameraSetup) {
        if setup != self.setup {
            self.setup = setup;
            self.reset();
        }
    }

    pub fn setup(&self) -> &CameraSetup {
        &self.setup
    }

    fn clamp(&mut self) {
        let min_polar = self.setup.min_polar.max(POLAR_EPSILON);
        self.polar = self.polar.clamp(min_polar, self.setup.max_polar.max(min_polar));
        self.distance = self
            .distance
            .clamp(self.setup.min_distance, self.setup.max_distance);
    }

    /// Drag rotation in degrees; applied gradually by `update`
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_azimuth -= dx.to_radians();
        self.pending_polar -= dy.to_radians();
    }

    /// Scroll zoom; positive moves closer. Applied immediately.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta;
        self.clamp();
    }

    /// Screen-space pan, scaled by the distance to the target
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let scale = self.distance * 0.002;
        self.pending_pan += (-self.right_vector() * dx + self.up_vector() * dy) * scale;
    }

    /// Advance the damped motion by one frame. Returns whether the rig is
    /// still moving.
    pub fn update(&mut self) -> bool {
        let k = self.setup.damping.clamp(0.0, 1.0);
        if k == 0.0 {
            self.azimuth += self.pending_azimuth;
            self.polar += self.pending_polar;
            self.target += self.pending_pan;
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            self.pending_pan = Vec3::ZERO;
        } else {
            self.azimuth += self.pending_azimuth * k;
            self.polar += self.pending_polar * k;
            self.target += self.pending_pan * k;
            self.pending_azimuth *= 1.0 - k;
            self.pending_polar *= 1.0 - k;
            self.pending_pan *= 1.0 - k;
        }
        self.clamp();

        let moving = self.pending_azimuth.abs() > 1e-5
            || self.pending_polar.abs() > 1e-5
            || self.pending_pan.length_squared() > 1e-10;
        if !moving {
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            self.pending_pan = Vec3::ZERO;
        }
        moving
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.setup.fov_deg.to_radians(),
            aspect,
            self.setup.near,
            self.setup.far,
        )
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }

    /// Project a world point to screen coordinates, with its view depth
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= self.setup.near * 0.5 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some((egui::pos2(screen_x, screen_y), p.w))
    }

    /// Cast a ray from a screen position into the scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();
        let near = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    fn rig() -> OrbitRig {
        let config = PlannerConfig::default();
        OrbitRig::new(CameraSetup::for_room(
            &RoomDimensions::new(5000.0, 4000.0),
            &config.camera,
            &CoordinateTransform::from_config(&config),
        ))
    }

    fn settle(rig: &mut OrbitRig) {
        for _ in 0..10_000 {
            if !rig.update() {
                break;
            }
        }
    }

    #[test]
    fn test_initial_pose() {
        let rig = rig();
        assert_eq!(rig.target, Vec3::new(2.5, 0.5, 2.0));
        assert!((rig.eye_position() - Vec3::new(8.0, 6.0, 8.0)).length() < 1e-4);
    }

    #[test]
    fn test_polar_never_goes_below_floor() {
        let mut rig = rig();
        rig.rotate(0.0, -10_000.0);
        settle(&mut rig);
        assert!(rig.polar <= std::f32::consts::PI / 2.1 + 1e-6);
        assert!(rig.eye_position().y > rig.target.y);

        rig.rotate(0.0, 10_000.0);
        settle(&mut rig);
        assert!(rig.polar > 0.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut rig = rig();
        for _ in 0..100 {
            rig.zoom(0.5);
        }
        assert!((rig.distance - 2.0).abs() < 1e-6);
        for _ in 0..100 {
            rig.zoom(-0.5);
        }
        assert!((rig.distance - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut rig = rig();
        let start = rig.azimuth;
        rig.rotate(-20.0, 0.0);
        assert!(rig.update());
        let first = rig.azimuth - start;
        assert!(first > 0.0 && first < 20f32.to_radians() * 0.1);
        settle(&mut rig);
        assert!((rig.azimuth - start - 20f32.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn test_reset() {
        let mut rig = rig();
        rig.rotate(45.0, 10.0);
        rig.pan(100.0, 0.0);
        settle(&mut rig);
        rig.reset();
        assert_eq!(rig.target, Vec3::new(2.5, 0.5, 2.0));
        assert!(!rig.update());
    }

    #[test]
    fn test_center_ray_hits_target() {
        let rig = rig();
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let (screen, depth) = rig.project(rig.target, rect).unwrap();
        assert!((screen - rect.center()).length() < 1e-2);
        assert!(depth > 0.0);

        let ray = rig.screen_ray(rect.center(), rect);
        let to_target = (rig.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }
}
