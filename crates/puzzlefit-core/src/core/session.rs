//! Session controller.
//!
//! `GameSession` owns the board, camera, input state and the gameplay
//! systems, and advances everything from a single `tick(dt)` call. All
//! host-facing side effects accumulate in outboxes the host drains
//! after each tick, so the whole session runs headless and
//! deterministic under test.

use glam::Vec2;

use crate::api::config::PuzzleConfig;
use crate::api::types::{HostCommand, PieceId, SoundCue};
use crate::components::piece::Piece;
use crate::core::board::PieceBoard;
use crate::core::pose::Pose;
use crate::input::queue::{InputEvent, InputQueue, PointerButton, UiEvent};
use crate::input::state::InputState;
use crate::systems::camera::{Aabb, OrbitCamera};
use crate::systems::drag::DragController;
use crate::systems::scatter::Scatterer;
use crate::systems::snap::SnapSystem;

/// Lifecycle of one play-through. Both end states are terminal until
/// an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Ended(Outcome),
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Timeout,
}

pub struct GameSession {
    config: PuzzleConfig,
    board: PieceBoard,
    camera: OrbitCamera,
    snap: SnapSystem,
    drag: DragController,
    scatterer: Scatterer,
    input: InputState,
    phase: SessionPhase,
    elapsed: f32,
    snapped_count: usize,
    timer_text: String,
    sounds: Vec<SoundCue>,
    commands: Vec<HostCommand>,
}

impl GameSession {
    /// Builds a session over the given pieces. Piece flags are
    /// normalized to the parked state, the pieces are scattered and
    /// the camera is fitted around them, ready for a start command.
    pub fn new(config: PuzzleConfig, pieces: Vec<Piece>, seed: u64) -> Self {
        let mut board = PieceBoard::new();
        for mut piece in pieces {
            piece.active = false;
            piece.snapped = false;
            piece.selected = false;
            board.spawn(piece);
        }

        let mut session = GameSession {
            camera: OrbitCamera::from_config(&config.camera),
            snap: SnapSystem::new(config.snap.clone()),
            drag: DragController::new(),
            scatterer: Scatterer::new(config.scatter.clone(), seed),
            input: InputState::new(),
            phase: SessionPhase::NotStarted,
            elapsed: 0.0,
            snapped_count: 0,
            timer_text: String::new(),
            sounds: Vec::new(),
            commands: Vec::new(),
            board,
            config,
        };
        session.commands.push(HostCommand::SetStartButtonVisible(true));
        session
            .commands
            .push(HostCommand::SetRestartButtonVisible(false));
        session.commands.push(HostCommand::ClearMessage);
        session.emit_timer_text();
        session.scatter_and_frame();
        log::info!(
            "session ready: {} pieces, {:.0}s limit",
            session.board.len(),
            session.config.session.max_time_secs
        );
        session
    }

    /// Advances the session by `dt` seconds, consuming all pending
    /// host input. Event side effects happen first, then the held
    /// piece updates, then snapping, then session timing.
    pub fn tick(&mut self, dt: f32, input: &mut InputQueue) {
        for event in input.drain() {
            self.handle_event(&event);
            self.input.apply(&event);
        }

        if self.is_active() {
            self.drag.update(
                &mut self.board,
                &self.camera,
                &self.input,
                &self.config.drag,
                &self.config.bindings,
                dt,
            );
        }

        for id in self.snap.tick(&mut self.board, dt) {
            self.snapped_count += 1;
            self.sounds.push(SoundCue::Snap);
            log::info!(
                "piece {:?} locked in ({}/{})",
                id,
                self.snapped_count,
                self.board.len()
            );
        }

        self.advance_timer(dt);
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
            } => {
                let cursor = Vec2::new(x, y);
                if let Some(id) = self.drag.try_begin(&mut self.board, &self.camera, cursor) {
                    // Highlight changes are suppressed outside a run,
                    // the hold itself is not.
                    if self.is_active() {
                        self.commands.push(HostCommand::Highlight {
                            piece: id,
                            color: Some(self.config.drag.highlight),
                        });
                    }
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => {
                if let Some(id) = self.drag.end() {
                    if self.is_active() {
                        self.commands.push(HostCommand::Highlight {
                            piece: id,
                            color: None,
                        });
                    }
                }
            }
            InputEvent::PointerMove { x, y } => {
                if self.input.secondary_held() {
                    let prev = self.input.cursor();
                    self.camera.orbit(x - prev.x, y - prev.y);
                }
            }
            InputEvent::Ui(UiEvent::Start) => self.start(),
            InputEvent::Ui(UiEvent::Restart) => self.restart(),
            InputEvent::Ui(UiEvent::NewGame) => self.request_new_game(),
            _ => {}
        }
    }

    /// Begins the run: activates every piece and starts the countdown.
    /// Ignored unless the session is parked in `NotStarted`.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            log::debug!("start ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = SessionPhase::Running;
        self.elapsed = 0.0;
        for piece in self.board.iter_mut() {
            piece.active = true;
            self.commands.push(HostCommand::SetPieceActive {
                piece: piece.id,
                active: true,
            });
        }
        self.commands.push(HostCommand::SetStartButtonVisible(false));
        self.emit_timer_text();
        log::info!("session started with {} pieces", self.board.len());
    }

    /// Returns the session to the parked state: pieces deactivated and
    /// re-scattered, timer and counters reset, end-state messaging
    /// cleared. The camera stays where the player left it; framing
    /// happens once at construction. Valid from any phase.
    pub fn restart(&mut self) {
        if let Some(id) = self.drag.end() {
            if self.is_active() {
                self.commands.push(HostCommand::Highlight {
                    piece: id,
                    color: None,
                });
            }
        }
        log::debug!(
            "restart discarding {} locked pieces",
            self.board.count_snapped()
        );
        self.phase = SessionPhase::NotStarted;
        self.elapsed = 0.0;
        self.snapped_count = 0;
        for piece in self.board.iter_mut() {
            piece.active = false;
            piece.snapped = false;
            piece.selected = false;
            self.commands.push(HostCommand::SetPieceActive {
                piece: piece.id,
                active: false,
            });
        }
        self.scatterer.scatter(&mut self.board, &mut self.commands);
        self.commands.push(HostCommand::ClearMessage);
        self.commands
            .push(HostCommand::SetRestartButtonVisible(false));
        self.commands.push(HostCommand::SetStartButtonVisible(true));
        self.emit_timer_text();
        log::info!("session reset");
    }

    /// Asks the host to load a fresh scene.
    pub fn request_new_game(&mut self) {
        log::info!(
            "new game requested, loading scene {:?}",
            self.config.session.scene_name
        );
        self.commands
            .push(HostCommand::LoadScene(self.config.session.scene_name.clone()));
    }

    fn advance_timer(&mut self, dt: f32) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.elapsed += dt;
        self.emit_timer_text();
        // Snap evaluation ran earlier in the tick. A board completed
        // on the deadline tick is a win; timeout needs an unfinished
        // board.
        if self.snapped_count == self.board.len() {
            self.end(Outcome::Success);
        } else if self.elapsed >= self.config.session.max_time_secs {
            self.end(Outcome::Timeout);
        }
    }

    fn end(&mut self, outcome: Outcome) {
        self.phase = SessionPhase::Ended(outcome);
        let message = match outcome {
            Outcome::Success => "Congratulations! You completed the puzzle!",
            Outcome::Timeout => "Time's up! Better luck next time.",
        };
        self.commands
            .push(HostCommand::ShowMessage(message.to_string()));
        self.commands.push(HostCommand::SetRestartButtonVisible(true));
        log::info!("session over: {:?} after {:.1}s", outcome, self.elapsed);
    }

    /// Emits the remaining time as `Time: mm:ss`, only when the text
    /// changed.
    fn emit_timer_text(&mut self) {
        let remaining = (self.config.session.max_time_secs - self.elapsed).max(0.0);
        let minutes = (remaining / 60.0).floor() as u32;
        let seconds = (remaining % 60.0).floor() as u32;
        let text = format!("Time: {:02}:{:02}", minutes, seconds);
        if text != self.timer_text {
            self.timer_text = text.clone();
            self.commands.push(HostCommand::SetTimerText(text));
        }
    }

    fn scatter_and_frame(&mut self) {
        self.scatterer.scatter(&mut self.board, &mut self.commands);
        let mut bounds: Option<Aabb> = None;
        for piece in self.board.iter() {
            let ball = Aabb::from_sphere(piece.pose.position, piece.bounds_radius);
            bounds = Some(match bounds {
                Some(b) => b.union(ball),
                None => ball,
            });
        }
        match bounds {
            Some(b) => self.camera.fit_to_bounds(b),
            None => log::warn!("no pieces to frame, camera left in place"),
        }
    }

    /// Overwrites a piece's pose, e.g. from a host-side physics step.
    /// Locked pieces and unknown ids are skipped.
    pub fn set_piece_pose(&mut self, id: PieceId, pose: Pose) {
        match self.board.get_mut(id) {
            Some(piece) => {
                if piece.snapped {
                    log::debug!("pose update for locked piece {:?} ignored", id);
                    return;
                }
                piece.pose = pose;
            }
            None => log::warn!("pose update for unknown piece {:?}", id),
        }
    }

    /// Reassigns a piece's target pose. A locked piece unlocks and the
    /// snapped counter drops with it, so the win condition keeps
    /// counting actual locked pieces.
    pub fn set_piece_target(&mut self, id: PieceId, target: Pose) {
        match self.board.get_mut(id) {
            Some(piece) => {
                if piece.snapped {
                    piece.snapped = false;
                    self.snapped_count -= 1;
                }
                piece.target = target;
            }
            None => log::warn!("target update for unknown piece {:?}", id),
        }
    }

    /// Takes all sound cues emitted since the last drain.
    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds)
    }

    /// Takes all host commands emitted since the last drain.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True while a run is in progress.
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Seconds of run time consumed so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn snapped_count(&self) -> usize {
        self.snapped_count
    }

    pub fn total_pieces(&self) -> usize {
        self.board.len()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.board.get(id)
    }

    /// Looks a piece up by the name the host's scene uses for it.
    pub fn find_piece(&self, name: &str) -> Option<&Piece> {
        self.board.find_by_name(name)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.board.iter()
    }

    /// Id of the piece currently held by the pointer, if any.
    pub fn dragged_piece(&self) -> Option<PieceId> {
        self.drag.dragged()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.camera.set_screen_size(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn piece_at(id: u32, target: Vec3) -> Piece {
        Piece::new(PieceId(id))
            .with_name(format!("p{id}"))
            .with_target(Pose::from_position(target))
            .with_bounds_radius(0.5)
    }

    fn two_piece_session() -> GameSession {
        let pieces = vec![
            piece_at(1, Vec3::new(1.0, 0.0, 0.0)),
            piece_at(2, Vec3::new(-1.0, 0.0, 0.0)),
        ];
        GameSession::new(PuzzleConfig::default(), pieces, 99)
    }

    fn start(session: &mut GameSession, queue: &mut InputQueue) {
        queue.push(InputEvent::Ui(UiEvent::Start));
        session.tick(0.01, queue);
    }

    fn timer_texts(commands: &[HostCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, HostCommand::SetTimerText(_)))
            .count()
    }

    #[test]
    fn new_session_is_parked() {
        let mut session = two_piece_session();
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(!session.is_active());
        assert!(session.pieces().all(|p| !p.active && !p.snapped));
        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::SetStartButtonVisible(true)));
        assert!(commands.contains(&HostCommand::SetTimerText("Time: 07:00".into())));
    }

    #[test]
    fn pieces_resolve_by_host_name() {
        let session = two_piece_session();
        assert_eq!(session.find_piece("p1").unwrap().id, PieceId(1));
        assert!(session.find_piece("absent").is_none());
    }

    #[test]
    fn construction_scatters_into_the_box() {
        let session = two_piece_session();
        for piece in session.pieces() {
            let p = piece.pose.position;
            assert!(p.x.abs() <= 1.5 && p.y.abs() <= 1.5 && p.z.abs() <= 1.5);
        }
    }

    #[test]
    fn start_activates_pieces() {
        let mut session = two_piece_session();
        session.drain_commands();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);

        assert_eq!(session.phase(), SessionPhase::Running);
        assert!(session.pieces().all(|p| p.active));
        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::SetStartButtonVisible(false)));
        let activations = commands
            .iter()
            .filter(|c| matches!(c, HostCommand::SetPieceActive { active: true, .. }))
            .count();
        assert_eq!(activations, 2);
    }

    #[test]
    fn start_twice_is_ignored() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        session.drain_commands();

        queue.push(InputEvent::Ui(UiEvent::Start));
        session.tick(0.01, &mut queue);

        assert_eq!(session.phase(), SessionPhase::Running);
        let commands = session.drain_commands();
        let activations = commands
            .iter()
            .filter(|c| matches!(c, HostCommand::SetPieceActive { .. }))
            .count();
        assert_eq!(activations, 0);
    }

    #[test]
    fn timer_counts_down_in_display_format() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        session.drain_commands();

        session.tick(61.0, &mut queue);

        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::SetTimerText("Time: 05:58".into())));
    }

    #[test]
    fn timer_text_deduped_within_the_same_second() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        session.drain_commands();

        for _ in 0..3 {
            session.tick(0.05, &mut queue);
        }
        assert_eq!(timer_texts(&session.drain_commands()), 0);

        session.tick(1.0, &mut queue);
        assert_eq!(timer_texts(&session.drain_commands()), 1);
    }

    #[test]
    fn session_times_out() {
        let mut config = PuzzleConfig::default();
        config.session.max_time_secs = 1.0;
        let pieces = vec![piece_at(1, Vec3::new(50.0, 0.0, 0.0))];
        let mut session = GameSession::new(config, pieces, 7);
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        session.drain_commands();

        session.tick(2.0, &mut queue);

        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Timeout));
        assert!(!session.is_active());
        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::ShowMessage(
            "Time's up! Better luck next time.".into()
        )));
        assert!(commands.contains(&HostCommand::SetRestartButtonVisible(true)));
    }

    #[test]
    fn solved_session_ends_in_success() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        let targets: Vec<(PieceId, Pose)> =
            session.pieces().map(|p| (p.id, p.target)).collect();
        for (id, target) in targets {
            session.set_piece_pose(id, target);
        }
        session.drain_sounds();
        session.drain_commands();

        session.tick(0.1, &mut queue);

        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Success));
        assert_eq!(session.snapped_count(), 2);
        assert_eq!(session.drain_sounds(), vec![SoundCue::Snap, SoundCue::Snap]);
        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::ShowMessage(
            "Congratulations! You completed the puzzle!".into()
        )));
    }

    #[test]
    fn last_lock_on_the_deadline_tick_still_wins() {
        let mut config = PuzzleConfig::default();
        config.session.max_time_secs = 1.0;
        let pieces = vec![piece_at(1, Vec3::new(1.0, 0.0, 0.0))];
        let mut session = GameSession::new(config, pieces, 3);
        session.set_piece_pose(PieceId(1), Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Ui(UiEvent::Start));

        session.tick(2.0, &mut queue);

        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Success));
        assert_eq!(session.snapped_count(), 1);
    }

    #[test]
    fn restart_resets_the_run() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        let targets: Vec<(PieceId, Pose)> =
            session.pieces().map(|p| (p.id, p.target)).collect();
        for (id, target) in targets {
            session.set_piece_pose(id, target);
        }
        session.tick(0.1, &mut queue);
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Success));
        session.drain_commands();

        queue.push(InputEvent::Ui(UiEvent::Restart));
        session.tick(0.01, &mut queue);

        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.snapped_count(), 0);
        assert!(session
            .pieces()
            .all(|p| !p.active && !p.snapped && !p.selected));
        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::ClearMessage));
        assert!(commands.contains(&HostCommand::SetStartButtonVisible(true)));
        assert!(commands.contains(&HostCommand::SetRestartButtonVisible(false)));
        assert!(commands.contains(&HostCommand::SetTimerText("Time: 07:00".into())));
    }

    #[test]
    fn restart_reshuffles_without_moving_the_camera() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown {
            x: 100.0,
            y: 100.0,
            button: PointerButton::Secondary,
        });
        queue.push(InputEvent::PointerMove { x: 180.0, y: 120.0 });
        session.tick(0.01, &mut queue);
        let camera = session.camera();
        let (azimuth, elevation) = (camera.azimuth, camera.elevation);
        let (distance, target) = (camera.distance, camera.target);

        queue.push(InputEvent::Ui(UiEvent::Restart));
        session.tick(0.01, &mut queue);

        let camera = session.camera();
        assert_eq!(camera.azimuth, azimuth);
        assert_eq!(camera.elevation, elevation);
        assert_eq!(camera.distance, distance);
        assert_eq!(camera.target, target);
        for piece in session.pieces() {
            let p = piece.pose.position;
            assert!(p.x.abs() <= 1.5 && p.y.abs() <= 1.5 && p.z.abs() <= 1.5);
        }
    }

    #[test]
    fn zero_piece_session_solves_on_first_tick() {
        let mut session = GameSession::new(PuzzleConfig::default(), vec![], 1);
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Success));
    }

    #[test]
    fn retarget_clears_lock_and_counter() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        let target = session.piece(PieceId(1)).unwrap().target;
        session.set_piece_pose(PieceId(1), target);
        session.tick(0.05, &mut queue);
        assert_eq!(session.snapped_count(), 1);

        session.set_piece_target(PieceId(1), Pose::from_position(Vec3::new(30.0, 0.0, 0.0)));

        assert_eq!(session.snapped_count(), 0);
        assert!(!session.piece(PieceId(1)).unwrap().snapped);
    }

    #[test]
    fn set_piece_pose_ignores_locked_pieces() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        let target = session.piece(PieceId(1)).unwrap().target;
        session.set_piece_pose(PieceId(1), target);
        session.tick(0.05, &mut queue);
        assert!(session.piece(PieceId(1)).unwrap().snapped);

        session.set_piece_pose(PieceId(1), Pose::from_position(Vec3::new(9.0, 9.0, 9.0)));

        assert_eq!(
            session.piece(PieceId(1)).unwrap().pose.position,
            target.position
        );
    }

    #[test]
    fn drag_highlight_flow() {
        let pieces = vec![piece_at(1, Vec3::new(0.0, 10.0, 0.0))];
        let mut session = GameSession::new(PuzzleConfig::default(), pieces, 11);
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);
        session.drain_commands();

        let center = session
            .camera()
            .project(session.piece(PieceId(1)).unwrap().pose.position)
            .pos;
        queue.push(InputEvent::PointerDown {
            x: center.x,
            y: center.y,
            button: PointerButton::Primary,
        });
        session.tick(0.01, &mut queue);

        assert_eq!(session.dragged_piece(), Some(PieceId(1)));
        let down = session.drain_commands();
        assert!(down.iter().any(|c| matches!(
            c,
            HostCommand::Highlight {
                piece: PieceId(1),
                color: Some(_)
            }
        )));

        queue.push(InputEvent::PointerUp {
            x: center.x,
            y: center.y,
            button: PointerButton::Primary,
        });
        session.tick(0.01, &mut queue);

        assert_eq!(session.dragged_piece(), None);
        let up = session.drain_commands();
        assert!(up.iter().any(|c| matches!(
            c,
            HostCommand::Highlight {
                piece: PieceId(1),
                color: None
            }
        )));
        assert!(session.piece(PieceId(1)).unwrap().selected);
    }

    #[test]
    fn pointer_up_after_timeout_releases_without_highlight() {
        let mut config = PuzzleConfig::default();
        config.session.max_time_secs = 0.5;
        let pieces = vec![piece_at(1, Vec3::new(0.0, 10.0, 0.0))];
        let mut session = GameSession::new(config, pieces, 11);
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);

        let center = session
            .camera()
            .project(session.piece(PieceId(1)).unwrap().pose.position)
            .pos;
        queue.push(InputEvent::PointerDown {
            x: center.x,
            y: center.y,
            button: PointerButton::Primary,
        });
        session.tick(0.01, &mut queue);
        assert_eq!(session.dragged_piece(), Some(PieceId(1)));

        session.tick(1.0, &mut queue);
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Timeout));
        session.drain_commands();

        queue.push(InputEvent::PointerUp {
            x: center.x,
            y: center.y,
            button: PointerButton::Primary,
        });
        session.tick(0.01, &mut queue);

        assert_eq!(session.dragged_piece(), None);
        let commands = session.drain_commands();
        assert!(!commands
            .iter()
            .any(|c| matches!(c, HostCommand::Highlight { .. })));
    }

    #[test]
    fn orbit_requires_secondary_button() {
        let mut session = two_piece_session();
        let mut queue = InputQueue::new();
        let before = session.camera().azimuth;

        queue.push(InputEvent::PointerMove { x: 100.0, y: 100.0 });
        session.tick(0.01, &mut queue);
        assert_eq!(session.camera().azimuth, before);

        queue.push(InputEvent::PointerDown {
            x: 100.0,
            y: 100.0,
            button: PointerButton::Secondary,
        });
        queue.push(InputEvent::PointerMove { x: 140.0, y: 100.0 });
        session.tick(0.01, &mut queue);

        let swing = session.camera().azimuth - before;
        let expected = (40.0 * 0.25_f32).to_radians();
        assert!((swing - expected).abs() < 1e-4, "swing was {}", swing);
    }

    #[test]
    fn new_game_emits_scene_load() {
        let mut session = two_piece_session();
        session.drain_commands();
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Ui(UiEvent::NewGame));
        session.tick(0.01, &mut queue);

        let commands = session.drain_commands();
        assert!(commands.contains(&HostCommand::LoadScene("main".into())));
    }

    #[test]
    fn scatter_impulses_reach_the_host() {
        let mut session = two_piece_session();
        let impulses = session
            .drain_commands()
            .iter()
            .filter(|c| matches!(c, HostCommand::Impulse { .. }))
            .count();
        assert_eq!(impulses, 2);
    }

    #[test]
    fn same_seed_sessions_scatter_identically() {
        let build = |seed| {
            GameSession::new(
                PuzzleConfig::default(),
                vec![piece_at(1, Vec3::ZERO), piece_at(2, Vec3::ZERO)],
                seed,
            )
        };
        let poses = |s: &GameSession| {
            s.pieces()
                .map(|p| (p.pose.position, p.pose.rotation))
                .collect::<Vec<_>>()
        };
        let a = build(5);
        let b = build(5);
        let c = build(6);
        assert_eq!(poses(&a), poses(&b));
        assert_ne!(poses(&a), poses(&c));
    }

    #[test]
    fn cursor_drag_carries_a_piece_to_its_target() {
        let pieces = vec![piece_at(1, Vec3::new(0.0, 50.0, 0.0))];
        let mut session = GameSession::new(PuzzleConfig::default(), pieces, 21);
        let mut queue = InputQueue::new();
        start(&mut session, &mut queue);

        // Retarget to a point in the piece's own view plane so the
        // cursor alone can carry it all the way in.
        let pos = session.piece(PieceId(1)).unwrap().pose.position;
        let depth = session.camera().view_depth(pos);
        let screen = session.camera().project(pos).pos;
        let goal = session
            .camera()
            .world_point_at_depth(screen + Vec2::new(60.0, 0.0), depth);
        session.set_piece_target(PieceId(1), Pose::from_position(goal));

        queue.push(InputEvent::PointerDown {
            x: screen.x,
            y: screen.y,
            button: PointerButton::Primary,
        });
        session.tick(0.1, &mut queue);
        assert_eq!(session.dragged_piece(), Some(PieceId(1)));

        let goal_screen = session.camera().project(goal).pos;
        queue.push(InputEvent::PointerMove {
            x: goal_screen.x,
            y: goal_screen.y,
        });
        session.tick(0.1, &mut queue);

        queue.push(InputEvent::PointerUp {
            x: goal_screen.x,
            y: goal_screen.y,
            button: PointerButton::Primary,
        });
        for _ in 0..20 {
            session.tick(0.5, &mut queue);
        }

        assert!(session.piece(PieceId(1)).unwrap().snapped);
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Success));
    }

    #[test]
    fn second_run_after_restart_can_succeed() {
        let mut config = PuzzleConfig::default();
        config.session.max_time_secs = 0.5;
        let pieces = vec![piece_at(1, Vec3::new(1.0, 0.0, 0.0))];
        let mut session = GameSession::new(config, pieces, 13);
        let mut queue = InputQueue::new();
        // Park the piece out of snap range so the clock runs out.
        session.set_piece_pose(PieceId(1), Pose::from_position(Vec3::new(30.0, 0.0, 0.0)));
        start(&mut session, &mut queue);
        session.tick(1.0, &mut queue);
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Timeout));

        queue.push(InputEvent::Ui(UiEvent::Restart));
        session.tick(0.01, &mut queue);
        assert_eq!(session.phase(), SessionPhase::NotStarted);

        start(&mut session, &mut queue);
        session.set_piece_pose(PieceId(1), Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        session.tick(0.1, &mut queue);
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Success));
    }
}
