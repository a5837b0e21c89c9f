//! Snap evaluator. Pulls unsnapped pieces toward their assigned
//! target pose once they come within the snap radius, and locks them
//! in when the remaining error drops under the lock-in thresholds.

use crate::api::config::SnapConfig;
use crate::api::types::PieceId;
use crate::components::piece::Piece;
use crate::core::board::PieceBoard;

pub struct SnapSystem {
    cfg: SnapConfig,
}

impl SnapSystem {
    pub fn new(cfg: SnapConfig) -> Self {
        SnapSystem { cfg }
    }

    /// Advances every active piece one step and returns the ids of the
    /// pieces that locked in this tick, in board order.
    pub fn tick(&self, board: &mut PieceBoard, dt: f32) -> Vec<PieceId> {
        let mut locked = Vec::new();
        for piece in board.iter_mut() {
            if !piece.active {
                continue;
            }
            if advance(piece, &self.cfg, dt) {
                locked.push(piece.id);
            }
        }
        locked
    }
}

/// One snap step for a single piece. Returns true when the piece
/// locked in during this step.
///
/// The blended pose is quantized onto a 0.01 grid (positions in world
/// units, rotations in euler degrees) before the thresholds see it, so
/// lock-in fires on the rounded values. The pull per step scales with
/// dt; steps much smaller than the grid can settle on a cell short of
/// the epsilon, which is why hosts tick the puzzle at a coarse logic
/// rate rather than per rendered frame.
fn advance(piece: &mut Piece, cfg: &SnapConfig, dt: f32) -> bool {
    if piece.snapped {
        return false;
    }
    if piece.pose.position.distance(piece.target.position) > cfg.snap_distance {
        return false;
    }

    let progress = 1.0 - (-dt * cfg.speed / cfg.snap_distance).exp();
    piece.pose = piece.pose.blend(&piece.target, progress).quantized();

    let close = piece.pose.position.distance(piece.target.position) <= cfg.position_epsilon;
    let aligned = piece.pose.angle_to_deg(&piece.target) <= cfg.angle_epsilon_deg;
    if close && aligned {
        piece.pose = piece.target;
        piece.snapped = true;
        return true;
    }
    false
}
