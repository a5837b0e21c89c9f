//! Scripted solver that plays a session through the same input events a
//! real host would send. It grabs a loose piece, drags the cursor over
//! the piece's target, closes the remaining view-depth gap with the
//! movement keys and then releases so the snap pull can finish the
//! placement.

use glam::{Vec2, Vec3};
use puzzlefit_core::{
    GameSession, InputEvent, InputQueue, PointerButton, PuzzleConfig, SessionPhase, UiEvent,
};

/// Release the hold once the view-depth gap is below this, in world
/// units. Comfortably inside the default snap radius.
const RELEASE_DEPTH_GAP: f32 = 0.3;
/// Logic steps to wait for a released piece to lock before regrabbing.
const SETTLE_PATIENCE: u32 = 120;

enum BotState {
    PressStart,
    Pick,
    Steer,
    Settle { ticks: u32, expect: usize },
    Done,
}

pub struct SolverBot {
    config: PuzzleConfig,
    state: BotState,
    held_key: Option<u32>,
    next_pick: usize,
    misses: usize,
}

impl SolverBot {
    pub fn new(config: PuzzleConfig) -> Self {
        SolverBot {
            config,
            state: BotState::PressStart,
            held_key: None,
            next_pick: 0,
            misses: 0,
        }
    }

    pub fn finished(&self) -> bool {
        matches!(self.state, BotState::Done)
    }

    /// Queue the input for one logic step based on what the session
    /// currently shows.
    pub fn drive(&mut self, session: &GameSession, queue: &mut InputQueue) {
        if matches!(session.phase(), SessionPhase::Ended(_)) {
            if !self.finished() {
                self.release(queue, Vec2::ZERO);
                self.state = BotState::Done;
            }
            return;
        }

        match self.state {
            BotState::PressStart => {
                queue.push(InputEvent::Ui(UiEvent::Start));
                self.state = BotState::Pick;
            }
            BotState::Pick => self.pick(session, queue),
            BotState::Steer => self.steer(session, queue),
            BotState::Settle { ticks, expect } => {
                if session.snapped_count() >= expect {
                    self.state = BotState::Pick;
                } else if ticks >= SETTLE_PATIENCE {
                    log::warn!("released piece did not lock, regrabbing");
                    self.state = BotState::Pick;
                } else {
                    self.state = BotState::Settle {
                        ticks: ticks + 1,
                        expect,
                    };
                }
            }
            BotState::Done => {}
        }
    }

    /// Grab the next loose piece under its own projected center.
    fn pick(&mut self, session: &GameSession, queue: &mut InputQueue) {
        let loose: Vec<_> = session.pieces().filter(|p| !p.snapped).collect();
        if loose.is_empty() {
            // The session will end on its own next tick.
            return;
        }
        let piece = loose[self.next_pick % loose.len()];
        self.next_pick += 1;
        let screen = session.camera().project(piece.pose.position).pos;
        queue.push(InputEvent::PointerMove {
            x: screen.x,
            y: screen.y,
        });
        queue.push(InputEvent::PointerDown {
            x: screen.x,
            y: screen.y,
            button: PointerButton::Primary,
        });
        log::debug!(
            "grabbing {} at {:.0},{:.0}",
            piece.name,
            screen.x,
            screen.y
        );
        self.state = BotState::Steer;
    }

    /// Keep the cursor over the target and hold whichever movement key
    /// closes the view-depth gap fastest.
    fn steer(&mut self, session: &GameSession, queue: &mut InputQueue) {
        let piece = match session.dragged_piece().and_then(|id| session.piece(id)) {
            Some(piece) => piece,
            None => {
                // The grab missed, try the next loose piece. After a
                // full fruitless cycle the view itself must be the
                // problem, so swing the camera before going around again.
                self.misses += 1;
                let loose = session.pieces().filter(|p| !p.snapped).count();
                if self.misses >= loose.max(1) {
                    self.nudge_camera(session, queue);
                    self.misses = 0;
                }
                self.state = BotState::Pick;
                return;
            }
        };
        self.misses = 0;
        let camera = session.camera();
        let target_screen = camera.project(piece.target.position).pos;

        if piece.snapped {
            // Locked mid-drag, nothing left to steer.
            self.release(queue, target_screen);
            self.state = BotState::Pick;
            return;
        }

        queue.push(InputEvent::PointerMove {
            x: target_screen.x,
            y: target_screen.y,
        });

        let gap =
            camera.view_depth(piece.pose.position) - camera.view_depth(piece.target.position);
        if gap.abs() <= RELEASE_DEPTH_GAP {
            let expect = session.snapped_count() + 1;
            self.release(queue, target_screen);
            self.state = BotState::Settle { ticks: 0, expect };
            return;
        }

        // Pick the key whose world direction, through the piece's own
        // rotation, points hardest along the view axis in the right
        // direction. One of the six axes always scores at least 1/sqrt(3).
        let forward = (camera.target - camera.position()).normalize();
        let toward = -gap.signum();
        let bindings = &self.config.bindings;
        let moves = [
            (bindings.move_x_pos, Vec3::X),
            (bindings.move_x_neg, Vec3::NEG_X),
            (bindings.move_y_pos, Vec3::Y),
            (bindings.move_y_neg, Vec3::NEG_Y),
            (bindings.move_z_pos, Vec3::Z),
            (bindings.move_z_neg, Vec3::NEG_Z),
        ];
        let mut best = (f32::MIN, bindings.move_z_pos);
        for (key, dir) in moves {
            let along = (piece.pose.rotation * dir).dot(forward) * toward;
            if along > best.0 {
                best = (along, key);
            }
        }
        if self.held_key != Some(best.1) {
            if let Some(old) = self.held_key.take() {
                queue.push(InputEvent::KeyUp { key_code: old });
            }
            queue.push(InputEvent::KeyDown { key_code: best.1 });
            self.held_key = Some(best.1);
        }
    }

    /// Orbit a few degrees so snapped pieces stop screening the loose
    /// ones from the pick ray.
    fn nudge_camera(&self, session: &GameSession, queue: &mut InputQueue) {
        let camera = session.camera();
        let center = Vec2::new(camera.screen_width / 2.0, camera.screen_height / 2.0);
        let swing = 10.0 / self.config.camera.sensitivity_deg.max(0.01);
        queue.push(InputEvent::PointerMove {
            x: center.x,
            y: center.y,
        });
        queue.push(InputEvent::PointerDown {
            x: center.x,
            y: center.y,
            button: PointerButton::Secondary,
        });
        queue.push(InputEvent::PointerMove {
            x: center.x + swing,
            y: center.y,
        });
        queue.push(InputEvent::PointerUp {
            x: center.x + swing,
            y: center.y,
            button: PointerButton::Secondary,
        });
        log::debug!("pick blocked, orbiting the camera");
    }

    fn release(&mut self, queue: &mut InputQueue, at: Vec2) {
        if let Some(key) = self.held_key.take() {
            queue.push(InputEvent::KeyUp { key_code: key });
        }
        queue.push(InputEvent::PointerUp {
            x: at.x,
            y: at.y,
            button: PointerButton::Primary,
        });
    }
}
