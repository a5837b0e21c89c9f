use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::api::config::CameraConfig;

/// Smallest usable orbit distance after a bounds fit.
const MIN_DISTANCE: f32 = 0.1;
/// Depth floor for the perspective scale divide.
const MIN_PROJECT_DEPTH: f32 = 0.05;

/// Projection result from 3D to 2D.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// 2D screen position.
    pub pos: Vec2,
    /// Depth along the view axis (positive = in front of the camera).
    pub depth: f32,
    /// Scale factor for depth-based sizing.
    pub scale: f32,
}

/// Axis-aligned bounding box, grown by union to frame the whole board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self {
            min: center - Vec3::splat(radius),
            max: center + Vec3::splat(radius),
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Orbit camera around a target point.
///
/// Azimuth rotates around the world Y axis, elevation tilts toward the
/// poles and is clamped short of them. Also supplies the projection
/// used for picking and depth-preserving drags, so sessions behave the
/// same with or without a real renderer behind them.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Rotation around the world Y axis (radians).
    pub azimuth: f32,
    /// Tilt above/below the horizon (radians), clamped.
    pub elevation: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Screen dimensions for projection.
    pub screen_width: f32,
    pub screen_height: f32,
    sensitivity: f32,
    max_elevation: f32,
    fit_factor: f32,
}

impl OrbitCamera {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            azimuth: 0.0,
            elevation: -0.3, // start slightly above, looking down
            distance: cfg.distance,
            target: Vec3::ZERO,
            screen_width: cfg.screen_width,
            screen_height: cfg.screen_height,
            sensitivity: cfg.sensitivity_deg.to_radians(),
            max_elevation: cfg.max_elevation_deg.to_radians(),
            fit_factor: cfg.fit_distance_factor,
        }
    }

    /// Orbit by a pointer delta.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth += dx * self.sensitivity;
        self.elevation -= dy * self.sensitivity;
        self.elevation = self.elevation.clamp(-self.max_elevation, self.max_elevation);
    }

    /// Update screen dimensions.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Retarget the bounds center at a distance proportional to the
    /// bounds diagonal. The orbit direction is kept.
    pub fn fit_to_bounds(&mut self, bounds: Aabb) {
        self.target = bounds.center();
        self.distance = (bounds.size().length() * self.fit_factor).max(MIN_DISTANCE);
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.azimuth, self.elevation, 0.0)
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.target + self.orientation() * (Vec3::Z * self.distance)
    }

    /// Depth of a world point along the view axis.
    pub fn view_depth(&self, point: Vec3) -> f32 {
        let rel = self.orientation().inverse() * (point - self.target);
        self.distance - rel.z
    }

    /// Project a 3D world position to 2D screen coordinates.
    pub fn project(&self, point: Vec3) -> Projection {
        let rel = self.orientation().inverse() * (point - self.target);
        let depth = self.distance - rel.z;
        let fov_scale = self.screen_height * 0.8;
        let scale = fov_scale / depth.max(MIN_PROJECT_DEPTH);
        Projection {
            pos: Vec2::new(
                self.screen_width / 2.0 + rel.x * scale,
                self.screen_height / 2.0 - rel.y * scale,
            ),
            depth,
            scale,
        }
    }

    /// Invert the projection at a known depth. Dragging uses this to
    /// keep a grabbed piece in its own view plane.
    pub fn world_point_at_depth(&self, screen: Vec2, depth: f32) -> Vec3 {
        let fov_scale = self.screen_height * 0.8;
        let rel = Vec3::new(
            (screen.x - self.screen_width / 2.0) * depth / fov_scale,
            -(screen.y - self.screen_height / 2.0) * depth / fov_scale,
            self.distance - depth,
        );
        self.target + self.orientation() * rel
    }

    /// Ray from the camera through a screen point, for hit testing.
    /// Returns (origin, normalized direction).
    pub fn pick_ray(&self, screen: Vec2) -> (Vec3, Vec3) {
        let origin = self.position();
        let through = self.world_point_at_depth(screen, 1.0);
        (origin, (through - origin).normalize_or_zero())
    }
}
