use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::AgentError;

use super::types::Partial;

/// Lazily produced agent output. An `Err` item is an unrecoverable fault.
pub type PartialStream = BoxStream<'static, Result<Partial, AgentError>>;

/// Conversational agent that answers a query incrementally.
///
/// Every call opens a fresh, single-consumer stream. Dropping the stream
/// abandons the remaining output.
#[async_trait]
pub trait AgentStream: Send + Sync {
    fn name(&self) -> &str;

    async fn stream(&self, query: &str, context_id: &str) -> Result<PartialStream, AgentError>;
}
