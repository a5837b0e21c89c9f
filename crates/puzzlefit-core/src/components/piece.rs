use crate::api::types::PieceId;
use crate::core::pose::Pose;

/// A puzzle piece, a single struct carrying all per-piece state.
/// Pieces are created at session construction and never destroyed
/// while the session lives.
#[derive(Debug, Clone)]
pub struct Piece {
    /// Unique identifier.
    pub id: PieceId,
    /// Display name for lookups and logs.
    pub name: String,
    /// Inactive pieces are invisible to picking and snapping.
    /// Pieces start inactive; the session activates them on start.
    pub active: bool,
    /// Current pose in world space.
    pub pose: Pose,
    /// The pose this piece must reach to count as placed.
    pub target: Pose,
    /// Locked into the target pose. Terminal until the target is
    /// reassigned or the session restarts.
    pub snapped: bool,
    /// Retains selection after a drag ends.
    pub selected: bool,
    /// Radius of the bounding sphere used for picking and camera fit.
    pub bounds_radius: f32,
}

impl Piece {
    /// Create a new piece with the given ID at the origin.
    pub fn new(id: PieceId) -> Self {
        Self {
            id,
            name: String::new(),
            active: false,
            pose: Pose::IDENTITY,
            target: Pose::IDENTITY,
            snapped: false,
            selected: false,
            bounds_radius: 0.5,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_target(mut self, target: Pose) -> Self {
        self.target = target;
        self
    }

    pub fn with_bounds_radius(mut self, radius: f32) -> Self {
        self.bounds_radius = radius;
        self
    }
}
