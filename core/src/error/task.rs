use thiserror::Error;

/// Failures raised by an agent backend while opening or iterating its stream.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("agent request failed: {0}")]
    Request(String),

    #[error("agent returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode agent output: {0}")]
    Decode(String),

    #[error("agent stream error: {0}")]
    Stream(String),

    #[error("scripted agent fault: {0}")]
    Scripted(String),
}

/// Reasons an [`EventSink`](crate::events::EventSink) refuses an event.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    #[error("event sink is full")]
    Full,

    #[error("event sink is closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("agent failure: {0}")]
    AgentFailure(#[from] AgentError),

    #[error("{0} not supported")]
    NotSupported(&'static str),

    #[error("sink rejected event: {0}")]
    SinkRejected(#[from] SinkError),
}

impl TaskError {
    /// Stable machine-readable name, used in logs and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProtocolViolation(_) => "protocol_violation",
            Self::AgentFailure(_) => "agent_failure",
            Self::NotSupported(_) => "not_supported",
            Self::SinkRejected(_) => "sink_rejected",
        }
    }
}
