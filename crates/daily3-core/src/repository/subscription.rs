//! Per-owner snapshot channels backing `TaskRepository::subscribe`.
//!
//! Each owner gets one `watch` channel carrying the full current task
//! list. A watch channel keeps only the latest value, which matches the
//! contract: every emission is the authoritative state, never a delta.

use crate::models::Task;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex};

pub struct SnapshotHub {
    channels: Mutex<HashMap<String, watch::Sender<Vec<Task>>>>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a subscriber, seeding the channel with a fresh snapshot.
    /// Re-seeding an existing channel also refreshes current subscribers.
    pub async fn subscribe(&self, owner: &str, seed: Vec<Task>) -> watch::Receiver<Vec<Task>> {
        let mut channels = self.channels.lock().await;
        match channels.get(owner) {
            Some(tx) => {
                tx.send_replace(seed);
                tx.subscribe()
            }
            None => {
                let (tx, rx) = watch::channel(seed);
                channels.insert(owner.to_string(), tx);
                rx
            }
        }
    }

    pub async fn publish(&self, owner: &str, snapshot: Vec<Task>) {
        let channels = self.channels.lock().await;
        if let Some(tx) = channels.get(owner) {
            tx.send_replace(snapshot);
        }
    }

    pub async fn has_subscribers(&self, owner: &str) -> bool {
        let channels = self.channels.lock().await;
        channels
            .get(owner)
            .map(|tx| tx.receiver_count() > 0)
            .unwrap_or(false)
    }
}

impl Default for SnapshotHub {
    fn default() -> Self {
        Self::new()
    }
}
