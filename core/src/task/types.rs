use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a task as observed through its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Working,
    InputRequired,
    Completed,
    Failed,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::InputRequired => "input_required",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// `working` is the only state a task can leave.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Working)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub context_id: String,
    pub input: String,
}

impl Task {
    /// Builds a task, generating a fresh context id when the caller gave none
    /// (or only whitespace).
    pub fn new(id: impl Into<String>, input: impl Into<String>, context_id: Option<String>) -> Self {
        let context_id = context_id
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self {
            id: id.into(),
            context_id,
            input: input.into(),
        }
    }
}

/// Body of `POST /task`.
///
/// `id` and `input` default to empty so that a missing field is reported by
/// request validation instead of the JSON layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub input: String,
    #[serde(default, rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

/// Reply to a synchronous submission.
///
/// `status` is always `completed` on the wire: a successful submission means
/// the request was processed, and whether the agent finished or asked a
/// question is carried by `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub output: String,
    pub status: TaskState,
}

impl TaskResponse {
    pub fn completed(id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            output: output.into(),
            status: TaskState::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_keeps_supplied_context() {
        let task = Task::new("t1", "hello", Some("ctx-1".into()));
        assert_eq!(task.context_id, "ctx-1");
        assert_eq!(task.input, "hello");
    }

    #[test]
    fn test_task_generates_context_when_absent_or_blank() {
        let a = Task::new("t1", "hello", None);
        let b = Task::new("t2", "hello", Some("   ".into()));
        assert!(Uuid::parse_str(&a.context_id).is_ok());
        assert!(Uuid::parse_str(&b.context_id).is_ok());
        assert_ne!(a.context_id, b.context_id);
    }

    #[test]
    fn test_state_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskState::InputRequired).unwrap(),
            "\"input_required\""
        );
        assert_eq!(TaskState::Completed.to_string(), "completed");
        assert!(!TaskState::Working.is_terminal());
        assert!(TaskState::Failed.is_terminal());
    }

    #[test]
    fn test_request_deserialize() {
        let json = r#"{"id":"t1","input":"Which roller?","contextId":"c9"}"#;
        let req: TaskRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, "t1");
        assert_eq!(req.context_id.as_deref(), Some("c9"));

        let req: TaskRequest = serde_json::from_str(r#"{"input":"x"}"#).unwrap();
        assert!(req.id.is_empty());
        assert!(req.context_id.is_none());
    }

    #[test]
    fn test_response_status_is_completed() {
        let resp = TaskResponse::completed("t1", "Which color family?");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({
                "id": "t1",
                "output": "Which color family?",
                "status": "completed"
            })
        );
    }
}
