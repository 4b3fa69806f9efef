pub mod definitions;
pub mod engine;
pub mod game;
pub mod protocol;
pub mod session;
pub mod utils;
