//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `zava_core::api` instead of reaching into internal modules.

pub use crate::agent::{AgentStream, Partial, PartialStream, ScriptStep, ScriptedAgent};
pub use crate::config::{
    apply_env_overrides, load_default, load_from_path, load_instructions, AgentBackend,
    AgentConfig, AppConfig, ExhaustionPolicy, LoggingConfig, ServerConfig,
};
pub use crate::error::{AgentError, CliError, SinkError, TaskError};
pub use crate::events::{channel, ChannelSink, CollectingSink, EventSink, TaskEvent};
pub use crate::executor::{ExecutionSummary, TaskExecutor};
pub use crate::server::{AgentCard, HealthStatus, TaskServer};
pub use crate::task::{Task, TaskRequest, TaskResponse, TaskState};
