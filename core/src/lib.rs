pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod executor;
pub mod server;
pub mod state;
pub mod task;
