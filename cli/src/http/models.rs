//! HTTP API数据模型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use zava_core::api::TaskError;

/// 错误响应体：`{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 任务接口的所有失败都映射为 500 + `{error}`
#[derive(Debug)]
pub enum HttpServerError {
    /// 请求体不是合法的任务JSON
    InvalidRequest(String),
    /// 执行器返回的结构化错误
    Task(TaskError),
}

impl HttpServerError {
    pub fn message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("invalid task request: {msg}"),
            Self::Task(e) => e.to_string(),
        }
    }
}

impl From<TaskError> for HttpServerError {
    fn from(e: TaskError) -> Self {
        Self::Task(e)
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
