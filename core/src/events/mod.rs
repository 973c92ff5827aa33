pub mod sink;
pub mod types;

pub use sink::{channel, ChannelSink, CollectingSink, EventSink};
pub use types::{
    AgentMessage, TaskArtifactUpdateEvent, TaskEvent, TaskStatus, TaskStatusUpdateEvent,
    TextArtifact, ARTIFACT_DESCRIPTION, ARTIFACT_NAME,
};
