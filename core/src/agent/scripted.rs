//! In-process agent that replays a fixed script.
//!
//! Used for local runs without a remote agent, and by the test suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use crate::error::AgentError;

use super::traits::{AgentStream, PartialStream};
use super::types::Partial;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Emit(Partial),
    /// Yields an `Err` item at this point of the stream.
    Fault(String),
}

impl From<Partial> for ScriptStep {
    fn from(p: Partial) -> Self {
        Self::Emit(p)
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    steps: Arc<Vec<ScriptStep>>,
    pulled: Arc<AtomicUsize>,
    open_fault: Option<String>,
}

impl ScriptedAgent {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ScriptStep>,
    {
        Self {
            steps: Arc::new(steps.into_iter().map(Into::into).collect()),
            pulled: Arc::new(AtomicUsize::new(0)),
            open_fault: None,
        }
    }

    /// An agent whose `stream` call itself fails.
    pub fn failing_to_open(reason: impl Into<String>) -> Self {
        Self {
            open_fault: Some(reason.into()),
            ..Self::new(Vec::<ScriptStep>::new())
        }
    }

    /// Number of steps consumers have pulled, across all streams.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentStream for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn stream(&self, query: &str, context_id: &str) -> Result<PartialStream, AgentError> {
        if let Some(reason) = &self.open_fault {
            return Err(AgentError::Scripted(reason.clone()));
        }
        tracing::debug!(
            target: "zava.agent",
            agent = "scripted",
            context_id = %context_id,
            query_len = query.len(),
            steps = self.steps.len(),
            "opening scripted stream"
        );

        let steps = Arc::clone(&self.steps);
        let pulled = Arc::clone(&self.pulled);
        let stream = futures::stream::iter(0..steps.len()).map(move |i| {
            pulled.fetch_add(1, Ordering::SeqCst);
            match &steps[i] {
                ScriptStep::Emit(p) => Ok(p.clone()),
                ScriptStep::Fault(reason) => Err(AgentError::Scripted(reason.clone())),
            }
        });
        Ok(stream.boxed())
    }
}
