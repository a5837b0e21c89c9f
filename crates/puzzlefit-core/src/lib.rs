pub mod api;
pub mod components;
pub mod core;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    CameraConfig, DragConfig, KeyBindings, PuzzleConfig, ScatterConfig, SessionConfig, SnapConfig,
};
pub use api::types::{HostCommand, PieceId, Rgba, SoundCue};
pub use components::piece::Piece;
pub use core::board::PieceBoard;
pub use core::pose::Pose;
pub use core::rng::Rng;
pub use core::session::{GameSession, Outcome, SessionPhase};
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue, PointerButton, UiEvent};
pub use input::state::InputState;
pub use systems::camera::{Aabb, OrbitCamera, Projection};
pub use systems::drag::DragController;
pub use systems::scatter::Scatterer;
pub use systems::snap::SnapSystem;
