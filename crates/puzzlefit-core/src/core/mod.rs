pub mod board;
pub mod pose;
pub mod rng;
pub mod session;
pub mod time;
