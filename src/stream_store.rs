//! Append-only streams.
//!
//! Each stream key owns an `Arc<RwLock<Stream>>`. Appends take the write
//! lock, so ids are resolved and pushed one at a time and the entry vector
//! stays sorted. Blocking readers park on an `mpsc` channel whose sender is
//! registered with every stream they watch; an append pokes the senders of
//! that stream only.

use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use dashmap::DashMap;
use tokio::{
    sync::{mpsc, mpsc::error::TrySendError, RwLock},
    time::Instant,
};
use tracing::debug;

use crate::stream_id::{IdRequest, StreamId, StreamIdError};

#[derive(Debug, Clone, PartialEq)]
pub struct StreamEntry {
    pub id: StreamId,
    /// Field/value pairs in the order they were given to XADD.
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct Stream {
    entries: Vec<StreamEntry>,
    listeners: Vec<mpsc::Sender<()>>,
}

impl Stream {
    fn last_id(&self) -> Option<StreamId> {
        self.entries.last().map(|entry| entry.id)
    }

    fn range(&self, start: StreamId, end: StreamId) -> &[StreamEntry] {
        let from = self.entries.partition_point(|entry| entry.id < start);
        let to = self.entries.partition_point(|entry| entry.id <= end);

        if from >= to {
            return &[];
        }

        &self.entries[from..to]
    }

    fn after(&self, id: StreamId) -> &[StreamEntry] {
        let from = self.entries.partition_point(|entry| entry.id <= id);

        &self.entries[from..]
    }

    fn notify_listeners(&mut self) {
        self.listeners
            .retain(|listener| match listener.try_send(()) {
                // A full channel already has a wake-up pending.
                Ok(()) | Err(TrySendError::Full(())) => true,
                Err(TrySendError::Closed(())) => false,
            });
    }
}

/// Where an XREAD starts reading a stream from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadStart {
    /// `$`: whatever the last id is when the read begins.
    LastEntry,
    /// Entries strictly after this id.
    After(StreamId),
}

/// How long XREAD waits when nothing qualifies yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockMode {
    Immediate,
    Forever,
    Timeout(Duration),
}

#[derive(Debug, Default)]
pub struct StreamStore {
    streams: DashMap<String, Arc<RwLock<Stream>>>,
}

impl StreamStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&self, key: &str) -> Arc<RwLock<Stream>> {
        if let Some(stream) = self.streams.get(key) {
            return Arc::clone(&stream);
        }

        Arc::clone(&self.streams.entry(key.to_string()).or_default())
    }

    fn existing_stream(&self, key: &str) -> Option<Arc<RwLock<Stream>>> {
        self.streams.get(key).map(|stream| Arc::clone(&stream))
    }

    /// Reports whether `key` holds a stream with at least one entry.
    pub async fn has_entries(&self, key: &str) -> bool {
        match self.existing_stream(key) {
            Some(stream) => !stream.read().await.entries.is_empty(),
            None => false,
        }
    }

    /// Resolves `request` against the stream's top item and appends the entry.
    pub async fn add(
        &self,
        key: &str,
        request: IdRequest,
        fields: Vec<(String, String)>,
    ) -> Result<StreamId, StreamIdError> {
        let stream = self.stream(key);
        let mut stream = stream.write().await;

        let id = request.resolve(stream.last_id(), current_millis())?;

        stream.entries.push(StreamEntry { id, fields });
        stream.notify_listeners();

        debug!(key, %id, "appended stream entry");

        Ok(id)
    }

    /// Entries with `start <= id <= end`, in ascending order.
    pub async fn range(&self, key: &str, start: StreamId, end: StreamId) -> Vec<StreamEntry> {
        match self.existing_stream(key) {
            Some(stream) => stream.read().await.range(start, end).to_vec(),
            None => Vec::new(),
        }
    }

    pub async fn last_id(&self, key: &str) -> Option<StreamId> {
        match self.existing_stream(key) {
            Some(stream) => stream.read().await.last_id(),
            None => None,
        }
    }

    /// Reads every requested stream past its start position.
    ///
    /// Only streams with qualifying entries appear in the result. With a
    /// blocking `mode` and nothing to return yet, waits until one of the
    /// streams is appended to or the timeout elapses; an elapsed timeout
    /// yields an empty result.
    pub async fn read(
        &self,
        requests: Vec<(String, ReadStart)>,
        mode: BlockMode,
    ) -> Vec<(String, Vec<StreamEntry>)> {
        let mut positions = Vec::with_capacity(requests.len());

        for (key, start) in requests {
            let after = match start {
                ReadStart::After(id) => id,
                ReadStart::LastEntry => self.last_id(&key).await.unwrap_or(StreamId::ZERO),
            };

            positions.push((key, after));
        }

        if mode == BlockMode::Immediate {
            return self.read_positions(&positions).await;
        }

        let (sender, mut receiver) = mpsc::channel(1);

        // Listen before the first read so an append in between still wakes us.
        for (key, _) in &positions {
            self.stream(key).write().await.listeners.push(sender.clone());
        }

        let deadline = match mode {
            BlockMode::Timeout(timeout) => Some(Instant::now() + timeout),
            _ => None,
        };

        let results = loop {
            let results = self.read_positions(&positions).await;

            if !results.is_empty() {
                break results;
            }

            let notified = match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, receiver.recv())
                    .await
                    .is_ok(),
                None => receiver.recv().await.is_some(),
            };

            if !notified {
                debug!("blocking stream read timed out");
                break Vec::new();
            }
        };

        for (key, _) in &positions {
            if let Some(stream) = self.existing_stream(key) {
                stream
                    .write()
                    .await
                    .listeners
                    .retain(|listener| !listener.same_channel(&sender));
            }
        }

        results
    }

    async fn read_positions(&self, positions: &[(String, StreamId)]) -> Vec<(String, Vec<StreamEntry>)> {
        let mut results = Vec::new();

        for (key, after) in positions {
            let Some(stream) = self.existing_stream(key) else {
                continue;
            };

            let entries = stream.read().await.after(*after).to_vec();

            if !entries.is_empty() {
                results.push((key.clone(), entries));
            }
        }

        results
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or_default()
}
