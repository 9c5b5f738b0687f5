pub mod client;
pub mod synthetic;
pub mod wire;
