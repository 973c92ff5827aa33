//! HTTP服务器生命周期管理

use super::{
    middleware::{create_middleware_stack, request_logger},
    routes::create_router,
    AppState,
};
use axum::middleware;
use std::time::Duration;
use tokio::signal;
use tracing::info;
use zava_core::api::{CliError, ServerConfig, TaskServer};

/// 组装路由和中间件
pub fn build_app(state: AppState, request_timeout: Duration) -> axum::Router {
    create_router(state)
        .layer(middleware::from_fn(request_logger))
        .layer(create_middleware_stack(request_timeout))
}

/// 启动HTTP服务器并阻塞直到关闭
pub async fn start_server(config: &ServerConfig, server: TaskServer) -> Result<(), CliError> {
    let app = build_app(
        AppState::new(server),
        Duration::from_millis(config.request_timeout_ms),
    );

    // "localhost" 需要解析，交给 TcpListener 处理
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CliError::Server(format!("bind {addr} failed: {e}")))?;

    info!(
        target: "zava.http",
        "HTTP server listening on http://{}",
        listener.local_addr().map(|a| a.to_string()).unwrap_or(addr)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C signal");
                }
                _ = wait_for_sigterm() => {
                    info!("Received SIGTERM signal");
                }
            }

            info!("Starting graceful shutdown...");
        })
        .await
        .map_err(|e| CliError::Server(e.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}

/// 等待 SIGTERM 信号（Unix系统）
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to setup SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Windows 系统不支持 SIGTERM
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
