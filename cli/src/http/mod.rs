//! HTTP服务器模块 - 暴露任务服务API（agent card / task / health）

pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use models::*;
pub use server::*;
pub use state::*;
