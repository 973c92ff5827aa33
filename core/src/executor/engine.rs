use std::sync::Arc;

use futures::StreamExt;

use crate::agent::AgentStream;
use crate::config::ExhaustionPolicy;
use crate::error::{AgentError, TaskError};
use crate::events::{EventSink, TaskEvent};
use crate::state::TaskLifecycle;
use crate::task::{Task, TaskState};

pub const EXHAUSTED_MESSAGE: &str = "agent stream ended without a result";

/// Outcome of one `execute` call that reached a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub final_state: TaskState,
    pub events_emitted: usize,
    pub partials_consumed: usize,
}

/// Drives one agent stream per task and translates its partials into
/// lifecycle events.
#[derive(Clone)]
pub struct TaskExecutor {
    agent: Arc<dyn AgentStream>,
    on_exhausted: ExhaustionPolicy,
}

/// Pairs the sink with the lifecycle check so that every event is validated
/// before it is handed over.
struct Emitter<'a> {
    lifecycle: TaskLifecycle,
    sink: &'a mut dyn EventSink,
}

impl Emitter<'_> {
    async fn emit(&mut self, event: TaskEvent) -> Result<(), TaskError> {
        self.lifecycle
            .observe(&event)
            .map_err(|e| TaskError::ProtocolViolation(e.to_string()))?;
        self.sink.enqueue(event).await?;
        Ok(())
    }
}

impl TaskExecutor {
    pub fn new(agent: Arc<dyn AgentStream>) -> Self {
        Self {
            agent,
            on_exhausted: ExhaustionPolicy::default(),
        }
    }

    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.on_exhausted = policy;
        self
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Runs `task` to its terminal event.
    ///
    /// Sink rejections abort immediately. Agent faults close the task with a
    /// `failed` status (best effort) and are then returned as
    /// [`TaskError::AgentFailure`].
    pub async fn execute(
        &self,
        task: &Task,
        sink: &mut dyn EventSink,
    ) -> Result<ExecutionSummary, TaskError> {
        tracing::info!(
            target: "zava.executor",
            task_id = %task.id,
            context_id = %task.context_id,
            agent = self.agent.name(),
            "task started"
        );

        let mut out = Emitter {
            lifecycle: TaskLifecycle::new(task.id.clone()),
            sink,
        };

        let mut stream = match self.agent.stream(&task.input, &task.context_id).await {
            Ok(s) => s,
            Err(e) => return Err(fail(task, &mut out, e).await),
        };

        let mut consumed = 0usize;
        let mut last_content: Option<String> = None;

        while let Some(item) = stream.next().await {
            consumed += 1;
            let partial = match item {
                Ok(p) => p,
                Err(e) => return Err(fail(task, &mut out, e).await),
            };

            tracing::debug!(
                target: "zava.executor",
                task_id = %task.id,
                index = consumed,
                is_task_complete = partial.is_task_complete,
                require_user_input = partial.require_user_input,
                content_len = partial.content.len(),
                "partial received"
            );

            if partial.require_user_input {
                out.emit(TaskEvent::input_required(task, &partial.content))
                    .await?;
                return Ok(finish(task, &out, TaskState::InputRequired, consumed));
            }

            if partial.is_task_complete {
                out.emit(TaskEvent::result_artifact(task, &partial.content))
                    .await?;
                out.emit(TaskEvent::completed(task)).await?;
                return Ok(finish(task, &out, TaskState::Completed, consumed));
            }

            out.emit(TaskEvent::working(task, &partial.content)).await?;
            last_content = Some(partial.content);
        }

        tracing::warn!(
            target: "zava.executor",
            task_id = %task.id,
            partials = consumed,
            policy = ?self.on_exhausted,
            "agent stream exhausted without completion or input request"
        );

        match self.on_exhausted {
            ExhaustionPolicy::Complete => {
                let text = last_content.unwrap_or_default();
                out.emit(TaskEvent::result_artifact(task, &text)).await?;
                out.emit(TaskEvent::completed(task)).await?;
                Ok(finish(task, &out, TaskState::Completed, consumed))
            }
            ExhaustionPolicy::Fail => {
                out.emit(TaskEvent::failed(task, EXHAUSTED_MESSAGE)).await?;
                Ok(finish(task, &out, TaskState::Failed, consumed))
            }
        }
    }

    /// Cancellation is not available; this always fails so callers can tell.
    pub async fn cancel(&self, task_id: &str) -> Result<(), TaskError> {
        tracing::warn!(
            target: "zava.executor",
            task_id = %task_id,
            "task cancellation requested but not supported"
        );
        Err(TaskError::NotSupported("cancel"))
    }
}

fn finish(task: &Task, out: &Emitter<'_>, state: TaskState, consumed: usize) -> ExecutionSummary {
    tracing::info!(
        target: "zava.executor",
        task_id = %task.id,
        state = %state,
        events = out.lifecycle.events_seen(),
        partials = consumed,
        "task finished"
    );
    ExecutionSummary {
        final_state: state,
        events_emitted: out.lifecycle.events_seen(),
        partials_consumed: consumed,
    }
}

/// Closes the task as `failed` and hands back the original fault. A sink
/// rejection while doing so is logged; the agent fault wins.
async fn fail(task: &Task, out: &mut Emitter<'_>, err: AgentError) -> TaskError {
    tracing::error!(
        target: "zava.executor",
        task_id = %task.id,
        error = %err,
        "agent stream failed"
    );
    if let Err(sink_err) = out.emit(TaskEvent::failed(task, &err.to_string())).await {
        tracing::warn!(
            target: "zava.executor",
            task_id = %task.id,
            error = %sink_err,
            "could not record failed status"
        );
    }
    TaskError::AgentFailure(err)
}
