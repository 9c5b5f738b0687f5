pub mod config;
pub mod refresh;
