//! HTTP路由handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use zava_core::api::{AgentCard, HealthStatus, TaskRequest, TaskResponse};

use crate::http::{models::HttpServerError, state::AppState};

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/agent-card", get(agent_card_handler))
        .route("/task", post(task_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// GET /agent-card - 能力描述
async fn agent_card_handler(State(state): State<AppState>) -> Json<AgentCard> {
    Json(state.server.agent_card())
}

/// POST /task - 同步执行一个任务
///
/// 请求体解析失败也走 `HttpServerError`，保证所有失败都是 500 + `{error}`。
async fn task_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, HttpServerError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!(target: "zava.http", error = %e.body_text(), "rejected task body");
        HttpServerError::InvalidRequest(e.body_text())
    })?;

    let resp = state.server.submit_task(req).await?;
    Ok(Json(resp))
}

/// GET /health - 存活检查
async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.server.health())
}
