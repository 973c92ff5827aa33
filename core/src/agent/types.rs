use serde::{Deserialize, Serialize};

/// One increment of agent output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partial {
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "is_task_complete")]
    pub is_task_complete: bool,
    #[serde(default, alias = "require_user_input")]
    pub require_user_input: bool,
}

impl Partial {
    pub fn working(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn complete(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_task_complete: true,
            require_user_input: false,
        }
    }

    pub fn needs_input(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_task_complete: false,
            require_user_input: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_accepts_both_casings() {
        let a: Partial =
            serde_json::from_str(r#"{"content":"x","isTaskComplete":true}"#).unwrap();
        let b: Partial =
            serde_json::from_str(r#"{"content":"x","is_task_complete":true}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Partial::complete("x"));
    }

    #[test]
    fn test_partial_flags_default_false() {
        let p: Partial = serde_json::from_str(r#"{"content":"hm"}"#).unwrap();
        assert_eq!(p, Partial::working("hm"));
    }
}
