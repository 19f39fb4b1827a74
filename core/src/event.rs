//! Change notifications emitted after every successful network mutation.

use crate::model::AccountKind;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkEvent {
    UserCreated { name: String },
    PageCreated { name: String },
    AccountRemoved {
        name: String,
        account: AccountKind,
        arcs_removed: usize,
    },
    Liked { user: String, page: String },
    Unliked { user: String, page: String },
    Followed { follower: String, followee: String },
    Unfollowed { follower: String, followee: String },
    AdminAdded { page: String, user: String },
    AdminRemoved { page: String, user: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub sequence: u64,
    pub network: String,
    pub event: NetworkEvent,
}

impl EventRecord {
    pub fn new(network: impl Into<String>, event: NetworkEvent) -> Self {
        Self {
            sequence: 0,
            network: network.into(),
            event,
        }
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event sink lock poisoned")]
    LockPoisoned,
    #[error("event io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("event serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: EventRecord) -> Result<(), EventError>;
}

#[derive(Default)]
pub struct InMemoryEventSink {
    events: Mutex<Vec<EventRecord>>,
    sequence: AtomicU64,
}

impl InMemoryEventSink {
    pub fn events(&self) -> Result<Vec<EventRecord>, EventError> {
        let events = self.events.lock().map_err(|_| EventError::LockPoisoned)?;
        Ok(events.clone())
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&self, mut event: EventRecord) -> Result<(), EventError> {
        let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        event.sequence = next;
        let mut events = self.events.lock().map_err(|_| EventError::LockPoisoned)?;
        events.push(event);
        Ok(())
    }
}

/// Appends one JSON object per line.
pub struct JsonlEventSink {
    writer: Mutex<std::fs::File>,
    sequence: AtomicU64,
}

impl JsonlEventSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EventError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;

        Ok(Self {
            writer: Mutex::new(writer),
            sequence: AtomicU64::new(0),
        })
    }
}

impl EventSink for JsonlEventSink {
    fn record(&self, mut event: EventRecord) -> Result<(), EventError> {
        let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        event.sequence = next;

        let line = serde_json::to_string(&event)?;
        let mut writer = self.writer.lock().map_err(|_| EventError::LockPoisoned)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
