pub mod server;
pub mod snapshot;
