pub mod card;
pub mod service;

pub use card::{product_helper_skill, AgentCapabilities, AgentCard, AgentSkill};
pub use service::{reduce_output, validate_request, HealthStatus, TaskServer, DEFAULT_OUTPUT};
