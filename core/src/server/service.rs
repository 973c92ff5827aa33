use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::agent::AgentStream;
use crate::config::AppConfig;
use crate::error::TaskError;
use crate::events::{CollectingSink, EventSink, TaskEvent};
use crate::executor::{ExecutionSummary, TaskExecutor};
use crate::task::{Task, TaskRequest, TaskResponse};

use super::card::AgentCard;

pub const DEFAULT_OUTPUT: &str = "Task completed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// Synchronous task front door: one submission in, one reduced response out.
///
/// Holds no per-task state, so a single instance can serve concurrent
/// submissions behind an `Arc`.
#[derive(Clone)]
pub struct TaskServer {
    executor: TaskExecutor,
    card: AgentCard,
}

impl TaskServer {
    pub fn new(executor: TaskExecutor, card: AgentCard) -> Self {
        Self { executor, card }
    }

    pub fn from_config(cfg: &AppConfig, agent: Arc<dyn AgentStream>) -> Self {
        let executor = TaskExecutor::new(agent).with_exhaustion_policy(cfg.executor.on_exhausted);
        Self::new(executor, AgentCard::build(&cfg.card, &cfg.server))
    }

    pub fn agent_card(&self) -> AgentCard {
        self.card.clone()
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            timestamp: Local::now().to_rfc3339(),
        }
    }

    /// Runs a task into a caller-provided sink, e.g. a channel for live output.
    pub async fn run_task(
        &self,
        task: &Task,
        sink: &mut dyn EventSink,
    ) -> Result<ExecutionSummary, TaskError> {
        self.executor.execute(task, sink).await
    }

    pub async fn submit_task(&self, request: TaskRequest) -> Result<TaskResponse, TaskError> {
        let request_id = request.id.clone();
        match self.submit_inner(request).await {
            Ok(resp) => Ok(resp),
            Err(e) => {
                tracing::error!(
                    target: "zava.server",
                    task_id = %request_id,
                    kind = e.kind(),
                    error = %e,
                    "task submission failed"
                );
                Err(e)
            }
        }
    }

    async fn submit_inner(&self, request: TaskRequest) -> Result<TaskResponse, TaskError> {
        validate_request(&request)?;
        let task = Task::new(request.id, request.input, request.context_id);

        let mut sink = CollectingSink::new();
        let summary = self.executor.execute(&task, &mut sink).await?;
        let output = reduce_output(sink.events());

        tracing::debug!(
            target: "zava.server",
            task_id = %task.id,
            final_state = %summary.final_state,
            events = summary.events_emitted,
            "task submission answered"
        );
        Ok(TaskResponse::completed(task.id, output))
    }

    pub async fn cancel_task(&self, task_id: &str) -> Result<(), TaskError> {
        self.executor.cancel(task_id).await
    }
}

/// `id` and `input` are required; `contextId` is the one field that may be
/// filled in for the caller.
pub fn validate_request(request: &TaskRequest) -> Result<(), TaskError> {
    if request.id.trim().is_empty() {
        return Err(TaskError::ProtocolViolation(
            "task request is missing required field 'id'".to_string(),
        ));
    }
    if request.input.trim().is_empty() {
        return Err(TaskError::ProtocolViolation(
            "task request is missing required field 'input'".to_string(),
        ));
    }
    Ok(())
}

/// Text of the last event (in emission order) that carries a non-blank
/// message or artifact, or [`DEFAULT_OUTPUT`].
pub fn reduce_output(events: &[TaskEvent]) -> String {
    events
        .iter()
        .rev()
        .filter_map(TaskEvent::text)
        .find(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_OUTPUT)
        .to_string()
}
