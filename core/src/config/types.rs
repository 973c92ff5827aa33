use serde::{Deserialize, Serialize};

use crate::agent::Partial;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub card: CardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Upper bound for a whole `POST /task` round trip.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_server_host() -> String {
    "localhost".to_string()
}

fn default_server_port() -> u16 {
    8001
}

fn default_request_timeout_ms() -> u64 {
    120_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "zava_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentBackend {
    #[default]
    Scripted,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub backend: AgentBackend,

    /// Endpoint of the remote agent when `backend = "http"`.
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_agent_timeout_ms")]
    pub timeout_ms: u64,

    /// Optional bearer token for the remote agent.
    #[serde(default)]
    pub api_key: String,

    /// Prompt file handed to the agent as its instructions.
    #[serde(default)]
    pub instructions_file: Option<String>,

    /// Partials replayed by the scripted backend.
    #[serde(default = "default_script")]
    pub script: Vec<Partial>,
}

fn default_agent_timeout_ms() -> u64 {
    60_000
}

fn default_script() -> Vec<Partial> {
    vec![
        Partial::working("Let me check the Zava catalog..."),
        Partial::complete("The 9-inch microfiber roller gives the best finish on smooth surfaces."),
    ]
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            backend: AgentBackend::default(),
            url: String::new(),
            timeout_ms: default_agent_timeout_ms(),
            api_key: String::new(),
            instructions_file: None,
            script: default_script(),
        }
    }
}

/// What the executor does when the agent stream ends without either flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Complete the task with the last content seen.
    #[default]
    Complete,
    /// Close the task with a `failed` status.
    Fail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutorConfig {
    #[serde(default)]
    pub on_exhausted: ExhaustionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default = "default_card_name")]
    pub name: String,

    #[serde(default = "default_card_description")]
    pub description: String,

    #[serde(default = "default_card_version")]
    pub version: String,

    #[serde(default = "default_card_streaming")]
    pub streaming: bool,
}

fn default_card_name() -> String {
    "Zava Product Helper".to_string()
}

fn default_card_description() -> String {
    "Zava Product Helper providing comprehensive product information and recommendations."
        .to_string()
}

fn default_card_version() -> String {
    "1.0.0".to_string()
}

fn default_card_streaming() -> bool {
    true
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            name: default_card_name(),
            description: default_card_description(),
            version: default_card_version(),
            streaming: default_card_streaming(),
        }
    }
}
