//! Pointer drag and keyboard manipulation of the held piece.
//!
//! One piece can be held at a time. Picking casts a ray through the
//! cursor and takes the nearest active piece; a locked-in piece in
//! front blocks the pick instead of letting the ray pass through it.
//! While held, the piece follows the cursor at its current view depth
//! and the rotation and movement keys adjust it in its local axes.

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::api::config::{DragConfig, KeyBindings};
use crate::api::types::PieceId;
use crate::components::piece::Piece;
use crate::core::board::PieceBoard;
use crate::input::state::InputState;
use crate::systems::camera::OrbitCamera;

#[derive(Default)]
pub struct DragController {
    dragging: Option<PieceId>,
    grab_offset: Vec3,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the piece currently held, if any.
    pub fn dragged(&self) -> Option<PieceId> {
        self.dragging
    }

    /// Tries to pick up the piece under the cursor. Returns the id on
    /// success. Fails silently when another piece is already held,
    /// when nothing is under the cursor, or when the nearest piece is
    /// already locked in.
    pub fn try_begin(
        &mut self,
        board: &mut PieceBoard,
        camera: &OrbitCamera,
        cursor: Vec2,
    ) -> Option<PieceId> {
        if self.dragging.is_some() {
            return None;
        }

        let (origin, dir) = camera.pick_ray(cursor);
        let mut best: Option<(PieceId, f32, bool)> = None;
        for piece in board.iter() {
            if !piece.active {
                continue;
            }
            if let Some(t) = ray_sphere(origin, dir, piece.pose.position, piece.bounds_radius) {
                if best.map_or(true, |(_, best_t, _)| t < best_t) {
                    best = Some((piece.id, t, piece.snapped));
                }
            }
        }

        let (id, _, snapped) = best?;
        if snapped {
            log::debug!("pick on {:?} ignored, piece is locked in", id);
            return None;
        }

        let piece = board.get_mut(id)?;
        let depth = camera.view_depth(piece.pose.position);
        self.grab_offset = piece.pose.position - camera.world_point_at_depth(cursor, depth);
        self.dragging = Some(id);
        piece.selected = true;
        log::debug!("drag begin on {:?}", id);
        Some(id)
    }

    /// Releases the held piece and returns its id.
    pub fn end(&mut self) -> Option<PieceId> {
        let released = self.dragging.take();
        if let Some(id) = released {
            log::debug!("drag end on {:?}", id);
        }
        released
    }

    /// Per-tick update of the held piece: cursor follow plus rotation
    /// and movement keys. Does nothing when no piece is held. A piece
    /// that locks in while held stops responding but keeps the hold
    /// token until the pointer is released.
    pub fn update(
        &mut self,
        board: &mut PieceBoard,
        camera: &OrbitCamera,
        input: &InputState,
        cfg: &DragConfig,
        bindings: &KeyBindings,
        dt: f32,
    ) {
        let id = match self.dragging {
            Some(id) => id,
            None => return,
        };
        let piece = match board.get_mut(id) {
            Some(piece) => piece,
            None => {
                log::warn!("held piece {:?} missing from board, dropping hold", id);
                self.dragging = None;
                return;
            }
        };
        if piece.snapped {
            return;
        }

        let depth = camera.view_depth(piece.pose.position);
        piece.pose.position = camera.world_point_at_depth(input.cursor(), depth) + self.grab_offset;

        rotate_held(piece, input, cfg, bindings, dt);
        translate_held(piece, input, cfg, bindings, dt);
    }
}

fn rotate_held(
    piece: &mut Piece,
    input: &InputState,
    cfg: &DragConfig,
    bindings: &KeyBindings,
    dt: f32,
) {
    let step = (cfg.rotation_speed_deg * dt).to_radians();
    let mut rx = 0.0;
    let mut ry = 0.0;
    let mut rz = 0.0;
    if input.is_held(bindings.rotate_x) {
        rx = step;
    }
    if input.is_held(bindings.rotate_y) {
        ry = step;
    }
    if input.is_held(bindings.rotate_z_pos) {
        rz = step;
    } else if input.is_held(bindings.rotate_z_neg) {
        rz = -step;
    }
    if rx != 0.0 || ry != 0.0 || rz != 0.0 {
        // All held rotation axes apply as one combined local-space step.
        let spin = Quat::from_euler(EulerRot::YXZ, ry, rx, rz);
        piece.pose.rotation = (piece.pose.rotation * spin).normalize();
    }
}

fn translate_held(
    piece: &mut Piece,
    input: &InputState,
    cfg: &DragConfig,
    bindings: &KeyBindings,
    dt: f32,
) {
    let dist = cfg.movement_speed * dt;
    let mut local = Vec3::ZERO;
    if input.is_held(bindings.move_x_pos) {
        local.x = dist;
    } else if input.is_held(bindings.move_x_neg) {
        local.x = -dist;
    }
    if input.is_held(bindings.move_y_pos) {
        local.y = dist;
    } else if input.is_held(bindings.move_y_neg) {
        local.y = -dist;
    }
    if input.is_held(bindings.move_z_pos) {
        local.z = dist;
    } else if input.is_held(bindings.move_z_neg) {
        local.z = -dist;
    }
    if local != Vec3::ZERO {
        piece.pose.position += piece.pose.rotation * local;
    }
}

/// Ray-sphere intersection. Returns the distance along the ray to the
/// nearest hit in front of the origin. `dir` must be normalized.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_disc;
    if far >= 0.0 {
        return Some(far);
    }
    None
}
