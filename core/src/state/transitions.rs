//! 状态转换规则和验证

use crate::events::TaskEvent;
use crate::task::TaskState;
use thiserror::Error;

/// 状态转换错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: Option<TaskState>,
        to: TaskState,
    },
    #[error("Cannot emit events after terminal state {state:?}")]
    FromTerminalState { state: TaskState },
    #[error("Status {state:?} emitted with final={is_final}")]
    FinalFlagMismatch { state: TaskState, is_final: bool },
    #[error("Completed status emitted without a result artifact")]
    MissingArtifact,
    #[error("Only a completed status may follow the result artifact, got {state:?}")]
    AfterArtifact { state: TaskState },
    #[error("Event for task {got} routed to task {expected}")]
    ForeignEvent { expected: String, got: String },
}

/// 状态转换
pub struct StateTransition;

impl StateTransition {
    /// 验证状态转换是否合法
    pub fn validate(from: Option<TaskState>, to: TaskState) -> Result<(), TransitionError> {
        // 终态不能转换
        if let Some(state) = from.filter(|s| s.is_terminal()) {
            return Err(TransitionError::FromTerminalState { state });
        }

        // 尚未开始或 working 中，可以转到任意状态
        match from {
            None | Some(TaskState::Working) => Ok(()),
            Some(_) => Err(TransitionError::InvalidTransition { from, to }),
        }
    }
}

/// 单个任务的事件序列校验器
#[derive(Debug, Clone)]
pub struct TaskLifecycle {
    task_id: String,
    current: Option<TaskState>,
    artifact_emitted: bool,
    events_seen: usize,
}

impl TaskLifecycle {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            current: None,
            artifact_emitted: false,
            events_seen: 0,
        }
    }

    /// 当前状态（尚无事件时为 None）
    pub fn current(&self) -> Option<TaskState> {
        self.current
    }

    pub fn is_closed(&self) -> bool {
        self.current.is_some_and(TaskState::is_terminal)
    }

    pub fn events_seen(&self) -> usize {
        self.events_seen
    }

    /// 校验并记录一个即将发出的事件
    pub fn observe(&mut self, event: &TaskEvent) -> Result<(), TransitionError> {
        if event.task_id() != self.task_id {
            return Err(TransitionError::ForeignEvent {
                expected: self.task_id.clone(),
                got: event.task_id().to_string(),
            });
        }
        if let Some(state) = self.current.filter(|s| s.is_terminal()) {
            return Err(TransitionError::FromTerminalState { state });
        }

        match event {
            TaskEvent::ArtifactUpdate(_) => {
                if self.artifact_emitted {
                    return Err(TransitionError::AfterArtifact {
                        state: TaskState::Working,
                    });
                }
                self.artifact_emitted = true;
            }
            TaskEvent::StatusUpdate(update) => {
                let to = update.status.state;
                StateTransition::validate(self.current, to)?;
                if update.is_final != to.is_terminal() {
                    return Err(TransitionError::FinalFlagMismatch {
                        state: to,
                        is_final: update.is_final,
                    });
                }
                match (self.artifact_emitted, to) {
                    (false, TaskState::Completed) => return Err(TransitionError::MissingArtifact),
                    (true, TaskState::Completed) | (false, _) => {}
                    (true, state) => return Err(TransitionError::AfterArtifact { state }),
                }
                self.current = Some(to);
            }
        }

        self.events_seen += 1;
        Ok(())
    }
}
