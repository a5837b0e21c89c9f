use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for a puzzle piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Linear RGBA color forwarded to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Default drag highlight.
    pub const YELLOW: Rgba = Rgba::new(1.0, 0.92, 0.016, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A sound cue emitted by the game logic.
/// The host maps each cue to an actual audio clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// A piece locked into its target pose.
    Snap,
}

/// An outbound side effect for the embedding host.
/// Commands are fire-and-forget: the host applies or ignores them,
/// nothing flows back into the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostCommand {
    /// Tint a piece, or restore its original material when `color` is None.
    Highlight { piece: PieceId, color: Option<Rgba> },
    /// Replace the countdown label text.
    SetTimerText(String),
    /// Show an end-of-session message.
    ShowMessage(String),
    /// Hide the end-of-session message.
    ClearMessage,
    SetStartButtonVisible(bool),
    SetRestartButtonVisible(bool),
    /// Show or hide a piece in the host scene.
    SetPieceActive { piece: PieceId, active: bool },
    /// Kick a piece's rigid body, if the host simulates one.
    Impulse { piece: PieceId, impulse: Vec3 },
    /// Ask the host to load a different scene.
    LoadScene(String),
}
