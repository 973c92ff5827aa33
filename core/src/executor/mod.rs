//! Task executor
//!
//! Turns the partial results of one agent stream into an ordered sequence of
//! task lifecycle events:
//!
//! ```text
//! Partial { require_user_input }  → StatusUpdate(input_required, final)
//! Partial { is_task_complete }    → ArtifactUpdate(final) + StatusUpdate(completed, final)
//! Partial { .. }                  → StatusUpdate(working)
//! stream exhausted                → ExhaustionPolicy
//! stream error                    → StatusUpdate(failed, final) + Err(AgentFailure)
//! ```

mod engine;

pub use engine::{ExecutionSummary, TaskExecutor, EXHAUSTED_MESSAGE};
