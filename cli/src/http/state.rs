//! HTTP服务器状态管理

use std::sync::Arc;
use zava_core::api::TaskServer;

/// 应用状态（在所有handlers间共享）
#[derive(Clone)]
pub struct AppState {
    pub server: Arc<TaskServer>,
}

impl AppState {
    pub fn new(server: TaskServer) -> Self {
        Self {
            server: Arc::new(server),
        }
    }
}
