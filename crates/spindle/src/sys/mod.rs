pub mod monitor;
pub mod runtime;
pub mod server;
