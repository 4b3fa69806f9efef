pub mod client;
pub mod config;
pub mod definitions;
pub mod handlers;
pub mod logic;
