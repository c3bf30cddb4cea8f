//! In-memory document store with live-query support.
//!
//! Implements both store capabilities over plain vectors: append-only
//! documents with store-assigned ids and timestamps, owner-filtered ordered
//! queries, and per-partition live snapshots through `tokio::sync::watch`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use desgen_core::conversation::{Entry, NewEntry};
use desgen_core::error::Result;
use desgen_core::run::{NewRun, Run};
use desgen_core::store::{EntryStore, RunStore};

type PartitionKey = (String, String);

/// An append-only in-memory store for entries and runs.
///
/// Timestamps are assigned with a strictly monotonic tie-break, so two
/// appends within the same clock tick still order by insertion. Each
/// `(owner_uid, run_id)` partition gets one watch channel; every append
/// into a watched partition publishes a fresh ordered snapshot.
pub struct MemoryStore {
    entries: RwLock<Vec<Entry>>,
    runs: RwLock<Vec<Run>>,
    feeds: RwLock<HashMap<PartitionKey, watch::Sender<Vec<Entry>>>>,
    last_timestamp: Mutex<DateTime<Utc>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            runs: RwLock::new(Vec::new()),
            feeds: RwLock::new(HashMap::new()),
            last_timestamp: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Assigns the next creation timestamp, strictly after the previous one.
    async fn next_timestamp(&self) -> DateTime<Utc> {
        let mut last = self.last_timestamp.lock().await;
        let mut now = Utc::now();
        if now <= *last {
            now = *last + Duration::microseconds(1);
        }
        *last = now;
        now
    }

    /// Ordered snapshot of one `(owner_uid, run_id)` partition.
    async fn partition_snapshot(&self, owner_uid: &str, run_id: &str) -> Vec<Entry> {
        let entries = self.entries.read().await;
        let mut snapshot: Vec<Entry> = entries
            .iter()
            .filter(|entry| entry.owner_uid == owner_uid && entry.run_id == run_id)
            .cloned()
            .collect();
        snapshot.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        snapshot
    }

    /// Publishes a fresh snapshot to the partition's feed, if watched.
    async fn publish(&self, owner_uid: &str, run_id: &str) {
        let key = (owner_uid.to_string(), run_id.to_string());
        let snapshot = self.partition_snapshot(owner_uid, run_id).await;
        let feeds = self.feeds.read().await;
        if let Some(sender) = feeds.get(&key) {
            sender.send_replace(snapshot);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn append(&self, entry: NewEntry) -> Result<Entry> {
        let entry = Entry {
            id: Uuid::new_v4().to_string(),
            owner_uid: entry.owner_uid,
            run_id: entry.run_id,
            role: entry.role,
            label: entry.label,
            content: entry.content,
            created_at: self.next_timestamp().await,
        };

        self.entries.write().await.push(entry.clone());
        self.publish(&entry.owner_uid, &entry.run_id).await;
        Ok(entry)
    }

    async fn watch(&self, owner_uid: &str, run_id: &str) -> Result<watch::Receiver<Vec<Entry>>> {
        let key = (owner_uid.to_string(), run_id.to_string());
        let snapshot = self.partition_snapshot(owner_uid, run_id).await;

        let mut feeds = self.feeds.write().await;
        let sender = feeds.entry(key).or_insert_with(|| {
            let (sender, _) = watch::channel(Vec::new());
            sender
        });
        sender.send_replace(snapshot);
        Ok(sender.subscribe())
    }
}

#[async_trait]
impl RunStore for MemoryStore {
    async fn append(&self, run: NewRun) -> Result<Run> {
        let run = Run {
            id: run.id,
            owner_uid: run.owner_uid,
            prompt: run.prompt,
            created_at: self.next_timestamp().await,
        };

        self.runs.write().await.push(run.clone());
        Ok(run)
    }

    async fn recent(&self, owner_uid: &str, limit: usize) -> Result<Vec<Run>> {
        let runs = self.runs.read().await;
        let mut recent: Vec<Run> = runs
            .iter()
            .filter(|run| run.owner_uid == owner_uid)
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }
}
