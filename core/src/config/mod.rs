mod load;
mod types;

pub use load::{apply_env_overrides, load_default, load_from_path, load_instructions};
pub use types::{
    AgentBackend, AgentConfig, AppConfig, CardConfig, ExecutorConfig, ExhaustionPolicy,
    LoggingConfig, ServerConfig,
};
