pub mod scripted;
pub mod traits;
pub mod types;

pub use scripted::{ScriptStep, ScriptedAgent};
pub use traits::{AgentStream, PartialStream};
pub use types::Partial;
