//! Lifecycle events emitted while a task runs.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskState};

pub const ARTIFACT_NAME: &str = "current_result";
pub const ARTIFACT_DESCRIPTION: &str = "Result of request to agent.";

/// Human-readable message attached to a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessage {
    pub text: String,
    pub context_id: String,
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<AgentMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextArtifact {
    pub name: String,
    pub description: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusUpdateEvent {
    pub task_id: String,
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskArtifactUpdateEvent {
    pub task_id: String,
    pub context_id: String,
    pub artifact: TextArtifact,
    #[serde(rename = "final")]
    pub is_final: bool,
}

/// Serialized with a `kind` tag: `status-update` or `artifact-update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskEvent {
    StatusUpdate(TaskStatusUpdateEvent),
    ArtifactUpdate(TaskArtifactUpdateEvent),
}

impl TaskEvent {
    fn status(task: &Task, state: TaskState, text: Option<&str>, is_final: bool) -> Self {
        let message = text.map(|t| AgentMessage {
            text: t.to_string(),
            context_id: task.context_id.clone(),
            task_id: task.id.clone(),
        });
        Self::StatusUpdate(TaskStatusUpdateEvent {
            task_id: task.id.clone(),
            context_id: task.context_id.clone(),
            status: TaskStatus { state, message },
            is_final,
        })
    }

    pub fn working(task: &Task, text: &str) -> Self {
        Self::status(task, TaskState::Working, Some(text), false)
    }

    pub fn input_required(task: &Task, text: &str) -> Self {
        Self::status(task, TaskState::InputRequired, Some(text), true)
    }

    pub fn completed(task: &Task) -> Self {
        Self::status(task, TaskState::Completed, None, true)
    }

    pub fn failed(task: &Task, text: &str) -> Self {
        Self::status(task, TaskState::Failed, Some(text), true)
    }

    pub fn result_artifact(task: &Task, text: &str) -> Self {
        Self::ArtifactUpdate(TaskArtifactUpdateEvent {
            task_id: task.id.clone(),
            context_id: task.context_id.clone(),
            artifact: TextArtifact {
                name: ARTIFACT_NAME.to_string(),
                description: ARTIFACT_DESCRIPTION.to_string(),
                text: text.to_string(),
            },
            is_final: true,
        })
    }

    pub fn task_id(&self) -> &str {
        match self {
            Self::StatusUpdate(e) => &e.task_id,
            Self::ArtifactUpdate(e) => &e.task_id,
        }
    }

    pub fn context_id(&self) -> &str {
        match self {
            Self::StatusUpdate(e) => &e.context_id,
            Self::ArtifactUpdate(e) => &e.context_id,
        }
    }

    pub fn is_final(&self) -> bool {
        match self {
            Self::StatusUpdate(e) => e.is_final,
            Self::ArtifactUpdate(e) => e.is_final,
        }
    }

    /// State carried by a status update; artifacts carry none.
    pub fn state(&self) -> Option<TaskState> {
        match self {
            Self::StatusUpdate(e) => Some(e.status.state),
            Self::ArtifactUpdate(_) => None,
        }
    }

    /// A final status update closes the task. The artifact that precedes a
    /// `completed` status is final for its own stream but does not end the task.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::StatusUpdate(e) if e.is_final)
    }

    /// Message text of a status update, or the artifact text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::StatusUpdate(e) => e.status.message.as_ref().map(|m| m.text.as_str()),
            Self::ArtifactUpdate(e) => Some(e.artifact.text.as_str()),
        }
    }
}
