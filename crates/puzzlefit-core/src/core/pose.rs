use glam::{EulerRot, Quat, Vec3};

/// A position and orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A pose at the given position with no rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Blend `t` of the way toward `target`: positions interpolate
    /// linearly, orientations via normalized quaternion lerp.
    pub fn blend(&self, target: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(target.position, t),
            rotation: self.rotation.lerp(target.rotation, t),
        }
    }

    /// Round the pose to two decimal places: position per component,
    /// orientation per Euler angle in degrees. Suppresses floating
    /// jitter so repeated blending settles on a stable value.
    pub fn quantized(&self) -> Pose {
        let (ry, rx, rz) = self.rotation.to_euler(EulerRot::YXZ);
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            round2(ry.to_degrees()).to_radians(),
            round2(rx.to_degrees()).to_radians(),
            round2(rz.to_degrees()).to_radians(),
        );
        Pose {
            position: Vec3::new(
                round2(self.position.x),
                round2(self.position.y),
                round2(self.position.z),
            ),
            rotation,
        }
    }

    /// Angular difference to another pose's orientation, in degrees.
    pub fn angle_to_deg(&self, other: &Pose) -> f32 {
        self.rotation.angle_between(other.rotation).to_degrees()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_rounds_position_to_two_decimals() {
        let pose = Pose::from_position(Vec3::new(1.234567, -0.006, 2.999));
        let q = pose.quantized();
        assert_eq!(q.position.x, 1.23);
        assert_eq!(q.position.y, -0.01);
        assert_eq!(q.position.z, 3.0);
    }

    #[test]
    fn quantize_rounds_euler_angles() {
        let rotation = Quat::from_euler(EulerRot::YXZ, 0.0, 0.123456_f32.to_radians(), 0.0);
        let q = Pose::new(Vec3::ZERO, rotation).quantized();
        let (_, rx, _) = q.rotation.to_euler(EulerRot::YXZ);
        assert!((rx.to_degrees() - 0.12).abs() < 1e-3, "got {}", rx.to_degrees());
    }

    #[test]
    fn blend_midpoint_halves_position_error() {
        let a = Pose::from_position(Vec3::ZERO);
        let b = Pose::from_position(Vec3::new(2.0, 0.0, 0.0));
        let mid = a.blend(&b, 0.5);
        assert!((mid.position.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn blend_full_reaches_target_orientation() {
        let a = Pose::IDENTITY;
        let b = Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.2));
        let end = a.blend(&b, 1.0);
        assert!(end.angle_to_deg(&b) < 1e-3);
    }

    #[test]
    fn angle_to_deg_measures_rotation() {
        let a = Pose::IDENTITY;
        let b = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!((a.angle_to_deg(&b) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn angle_ignores_quaternion_sign() {
        let q = Quat::from_rotation_x(0.7);
        let a = Pose::new(Vec3::ZERO, q);
        let b = Pose::new(Vec3::ZERO, -q);
        assert!(a.angle_to_deg(&b) < 1e-3);
    }
}
