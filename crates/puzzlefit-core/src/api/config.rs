use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::Rgba;

/// Tuning for a puzzle session. Every field has a sensible default,
/// so an empty JSON object is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub scatter: ScatterConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub bindings: KeyBindings,
}

impl PuzzleConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Proximity snapping parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Attraction radius around the target pose, in world units.
    pub snap_distance: f32,
    /// Blend rate of the exponential pull toward the target.
    pub speed: f32,
    /// Positional lock-in threshold, tested after quantization.
    pub position_epsilon: f32,
    /// Angular lock-in threshold in degrees, tested after quantization.
    pub angle_epsilon_deg: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_distance: 0.8,
            speed: 10.0,
            position_epsilon: 0.01,
            angle_epsilon_deg: 0.1,
        }
    }
}

/// Drag manipulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Keyboard rotation speed in degrees per second.
    pub rotation_speed_deg: f32,
    /// Keyboard translation speed in world units per second.
    pub movement_speed: f32,
    /// Tint applied to the dragged piece.
    pub highlight: Rgba,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            rotation_speed_deg: 100.0,
            movement_speed: 5.0,
            highlight: Rgba::YELLOW,
        }
    }
}

/// Session timing and scene wiring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown length in seconds.
    pub max_time_secs: f32,
    /// Scene the host should load when a new game is requested.
    pub scene_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_time_secs: 420.0,
            scene_name: "main".to_string(),
        }
    }
}

/// Piece scattering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Center of the scatter volume.
    pub center: Vec3,
    /// Extent of the scatter volume along each axis.
    pub size: Vec3,
    /// Magnitude of the random impulse forwarded to the host physics.
    /// Zero disables impulse commands.
    pub impulse_force: f32,
    /// Per-axis random rotation range in degrees, drawn from [0, range).
    pub rotation_range_deg: Vec3,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: Vec3::new(3.0, 3.0, 3.0),
            impulse_force: 5.0,
            rotation_range_deg: Vec3::new(360.0, 360.0, 360.0),
        }
    }
}

/// Orbit camera parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial orbit distance from the target.
    pub distance: f32,
    /// Orbit speed in degrees per pixel of pointer travel.
    pub sensitivity_deg: f32,
    /// Elevation clamp in degrees above/below the horizon.
    pub max_elevation_deg: f32,
    /// Fitted distance = bounds diagonal times this factor.
    pub fit_distance_factor: f32,
    /// Screen dimensions used for projection.
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 10.0,
            sensitivity_deg: 0.25,
            max_elevation_deg: 80.0,
            fit_distance_factor: 2.0,
            screen_width: 800.0,
            screen_height: 600.0,
        }
    }
}

/// Host key codes for piece manipulation while dragging.
/// Defaults use DOM `keyCode` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Rotate around the piece's local X axis.
    pub rotate_x: u32,
    /// Rotate around the piece's local Y axis.
    pub rotate_y: u32,
    /// Rotate around the piece's local Z axis, positive direction.
    pub rotate_z_pos: u32,
    /// Rotate around the piece's local Z axis, negative direction.
    pub rotate_z_neg: u32,
    pub move_x_pos: u32,
    pub move_x_neg: u32,
    pub move_y_pos: u32,
    pub move_y_neg: u32,
    pub move_z_pos: u32,
    pub move_z_neg: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate_x: 88,    // X
            rotate_y: 89,    // Y
            rotate_z_pos: 72, // H
            rotate_z_neg: 71, // G
            move_x_pos: 39,  // ArrowRight
            move_x_neg: 37,  // ArrowLeft
            move_y_pos: 38,  // ArrowUp
            move_y_neg: 40,  // ArrowDown
            move_z_pos: 87,  // W
            move_z_neg: 83,  // S
        }
    }
}
