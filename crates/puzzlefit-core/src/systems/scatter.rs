//! Random scatter of pieces across the staging volume.
//!
//! Each piece gets a uniform random position inside the scatter box
//! and a uniform random rotation per euler axis. When an impulse force
//! is configured, a matching impulse command is emitted so a host with
//! physics can fling the pieces apart visually.

use glam::{EulerRot, Quat, Vec3};

use crate::api::config::ScatterConfig;
use crate::api::types::HostCommand;
use crate::core::board::PieceBoard;
use crate::core::rng::Rng;

pub struct Scatterer {
    cfg: ScatterConfig,
    rng: Rng,
}

impl Scatterer {
    pub fn new(cfg: ScatterConfig, seed: u64) -> Self {
        Scatterer {
            cfg,
            rng: Rng::new(seed),
        }
    }

    /// Throws every piece to a random pose inside the scatter box.
    /// The rng stream carries across calls, so repeated scatters in
    /// one session produce different layouts.
    pub fn scatter(&mut self, board: &mut PieceBoard, commands: &mut Vec<HostCommand>) {
        if board.is_empty() {
            log::warn!("scatter requested with no pieces on the board");
            return;
        }

        let center = self.cfg.center;
        let half = self.cfg.size * 0.5;
        let spin = self.cfg.rotation_range_deg;
        for piece in board.iter_mut() {
            let x = self.rng.range(center.x - half.x, center.x + half.x);
            let y = self.rng.range(center.y - half.y, center.y + half.y);
            let z = self.rng.range(center.z - half.z, center.z + half.z);
            let rx = self.rng.range(0.0, spin.x);
            let ry = self.rng.range(0.0, spin.y);
            let rz = self.rng.range(0.0, spin.z);
            piece.pose.position = Vec3::new(x, y, z);
            piece.pose.rotation = Quat::from_euler(
                EulerRot::YXZ,
                ry.to_radians(),
                rx.to_radians(),
                rz.to_radians(),
            );
            if self.cfg.impulse_force > 0.0 {
                commands.push(HostCommand::Impulse {
                    piece: piece.id,
                    impulse: self.rng.in_unit_sphere() * self.cfg.impulse_force,
                });
            }
        }
        log::info!("scattered {} pieces", board.len());
    }
}
