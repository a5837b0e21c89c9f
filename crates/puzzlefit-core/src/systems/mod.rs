pub mod camera;
pub mod drag;
pub mod scatter;
pub mod snap;
