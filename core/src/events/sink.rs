use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::SinkError;

use super::types::TaskEvent;

/// Append-only, order-preserving destination for task events.
///
/// A sink belongs to exactly one running task; ownership of each event moves
/// into the sink on `enqueue`.
#[async_trait]
pub trait EventSink: Send {
    async fn enqueue(&mut self, event: TaskEvent) -> Result<(), SinkError>;
}

/// In-memory sink that keeps every event, optionally up to a fixed limit.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Vec<TaskEvent>,
    limit: Option<usize>,
    closed: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects with [`SinkError::Full`] once `limit` events are held.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit: Some(limit),
            closed: false,
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn events(&self) -> &[TaskEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TaskEvent> {
        self.events
    }
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn enqueue(&mut self, event: TaskEvent) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        if self.limit.is_some_and(|limit| self.events.len() >= limit) {
            return Err(SinkError::Full);
        }
        self.events.push(event);
        Ok(())
    }
}

/// Forwards events into a tokio channel so a consumer can observe them live.
pub struct ChannelSink {
    tx: mpsc::Sender<TaskEvent>,
    reject_when_full: bool,
}

impl ChannelSink {
    /// Waits for capacity; fails only once the receiver is gone.
    pub fn new(tx: mpsc::Sender<TaskEvent>) -> Self {
        Self {
            tx,
            reject_when_full: false,
        }
    }

    /// Fails with [`SinkError::Full`] instead of waiting for capacity.
    pub fn rejecting_when_full(tx: mpsc::Sender<TaskEvent>) -> Self {
        Self {
            tx,
            reject_when_full: true,
        }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn enqueue(&mut self, event: TaskEvent) -> Result<(), SinkError> {
        if self.reject_when_full {
            return self.tx.try_send(event).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => SinkError::Full,
                mpsc::error::TrySendError::Closed(_) => SinkError::Closed,
            });
        }
        self.tx.send(event).await.map_err(|_| SinkError::Closed)
    }
}

/// Bounded channel pair whose sender side is wrapped as a waiting [`ChannelSink`].
pub fn channel(capacity: usize) -> (ChannelSink, mpsc::Receiver<TaskEvent>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ChannelSink::new(tx), rx)
}
