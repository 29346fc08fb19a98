//! Lists with blocking pop.
//!
//! Every list key owns an `Arc<RwLock<ListEntry>>` that is created on first
//! use and never removed. The same lock guards both the elements and the
//! queue of blocked BLPOP clients, so a push and a timing-out waiter can never
//! both claim the same element.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use dashmap::DashMap;
use tokio::sync::{oneshot, RwLock};
use tracing::debug;

/// Which end of the list a push writes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushDirection {
    Left,
    Right,
}

/// A blocked BLPOP client waiting for exactly one element.
#[derive(Debug)]
pub struct Waiter {
    id: u64,
    sender: oneshot::Sender<String>,
}

#[derive(Debug, Default)]
pub struct ListEntry {
    elements: VecDeque<String>,
    waiters: VecDeque<Waiter>,
}

impl ListEntry {
    /// Hands pushed values to registered waiters in FIFO order.
    ///
    /// For a right push the batch is consumed from its front; for a left push
    /// from its back, since the last argument of LPUSH is the one that would
    /// end up at the head. Returns how many values were handed over.
    fn deliver_to_waiters(
        &mut self,
        values: &mut VecDeque<String>,
        direction: PushDirection,
    ) -> usize {
        let mut delivered = 0;

        while let Some(waiter) = self.waiters.pop_front() {
            let next_value = match direction {
                PushDirection::Right => values.pop_front(),
                PushDirection::Left => values.pop_back(),
            };

            let Some(value) = next_value else {
                self.waiters.push_front(waiter);
                break;
            };

            match waiter.sender.send(value) {
                Ok(()) => {
                    debug!(waiter = waiter.id, "delivered element to blocked client");
                    delivered += 1;
                }
                // The waiting client went away; offer the value to the next one.
                Err(returned) => match direction {
                    PushDirection::Right => values.push_front(returned),
                    PushDirection::Left => values.push_back(returned),
                },
            }
        }

        delivered
    }

    fn push(&mut self, values: VecDeque<String>, direction: PushDirection) {
        match direction {
            PushDirection::Right => self.elements.extend(values),
            PushDirection::Left => {
                for value in values {
                    self.elements.push_front(value);
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ListStore {
    lists: DashMap<String, Arc<RwLock<ListEntry>>>,
    next_waiter_id: AtomicU64,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `key`, creating it on first use.
    fn list(&self, key: &str) -> Arc<RwLock<ListEntry>> {
        if let Some(list) = self.lists.get(key) {
            return Arc::clone(&list);
        }

        Arc::clone(&self.lists.entry(key.to_string()).or_default())
    }

    fn existing_list(&self, key: &str) -> Option<Arc<RwLock<ListEntry>>> {
        self.lists.get(key).map(|list| Arc::clone(&list))
    }

    /// Pushes `values` as one batch and returns the resulting list length,
    /// counting elements handed straight to blocked clients.
    pub async fn push(&self, key: &str, values: Vec<String>, direction: PushDirection) -> usize {
        let list = self.list(key);
        let mut entry = list.write().await;

        let mut values = VecDeque::from(values);
        let delivered = entry.deliver_to_waiters(&mut values, direction);
        entry.push(values, direction);

        entry.elements.len() + delivered
    }

    /// Returns the elements between `start` and `stop` (inclusive). Negative
    /// indexes count from the end of the list.
    pub async fn range(&self, key: &str, start: i64, stop: i64) -> Vec<String> {
        let Some(list) = self.existing_list(key) else {
            return Vec::new();
        };

        let entry = list.read().await;

        match validate_range_indexes(&entry.elements, start, stop) {
            Ok((start, end)) => entry.elements.range(start..=end).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub async fn len(&self, key: &str) -> usize {
        match self.existing_list(key) {
            Some(list) => list.read().await.elements.len(),
            None => 0,
        }
    }

    /// Removes up to `count` elements from the head of the list.
    pub async fn pop(&self, key: &str, count: usize) -> Vec<String> {
        let Some(list) = self.existing_list(key) else {
            return Vec::new();
        };

        let mut entry = list.write().await;
        let count = count.min(entry.elements.len());

        entry.elements.drain(..count).collect()
    }

    /// Pops the head element, waiting for a push if the list is empty.
    ///
    /// `timeout` of `None` waits forever. On timeout the waiter is removed
    /// under the list lock; if a producer got there first the element it
    /// delivered is returned instead of `None`.
    pub async fn blocking_pop(&self, key: &str, timeout: Option<Duration>) -> Option<String> {
        let list = self.list(key);

        let (mut receiver, waiter_id) = {
            let mut entry = list.write().await;

            if let Some(value) = entry.elements.pop_front() {
                return Some(value);
            }

            let (sender, receiver) = oneshot::channel();
            let id = self.next_waiter_id.fetch_add(1, Ordering::Relaxed);
            entry.waiters.push_back(Waiter { id, sender });

            (receiver, id)
        };

        debug!(key, waiter = waiter_id, ?timeout, "client blocked on list");

        let Some(timeout) = timeout else {
            return receiver.await.ok();
        };

        match tokio::time::timeout(timeout, &mut receiver).await {
            Ok(result) => result.ok(),
            Err(_) => {
                let mut entry = list.write().await;
                let waiting = entry.waiters.len();
                entry.waiters.retain(|waiter| waiter.id != waiter_id);

                if entry.waiters.len() < waiting {
                    None
                } else {
                    receiver.try_recv().ok()
                }
            }
        }
    }

    /// Number of clients currently blocked on `key`.
    pub async fn waiter_count(&self, key: &str) -> usize {
        match self.existing_list(key) {
            Some(list) => list.read().await.waiters.len(),
            None => 0,
        }
    }
}

/// Validates and normalizes range indices for list operations.
///
/// Converts negative indices to positive equivalents and clamps them into the
/// list. Returns an error when the normalized range selects nothing.
///
/// ```text
/// // For a list of length 5:
/// // validate_range_indexes(&list, 0, 2) -> Ok((0, 2))
/// // validate_range_indexes(&list, -2, -1) -> Ok((3, 4))
/// // validate_range_indexes(&list, 0, -10) -> Ok((0, 0))
/// // validate_range_indexes(&list, 5, 10) -> Err("Start index is out of bounds")
/// ```
fn validate_range_indexes(
    list: &VecDeque<String>,
    start_index: i64,
    end_index: i64,
) -> Result<(usize, usize), &'static str> {
    let len = list.len() as i64;

    if len == 0 {
        return Err("List is empty");
    }

    let mut start = if start_index < 0 {
        len + start_index
    } else {
        start_index
    };
    let mut end = if end_index < 0 {
        len + end_index
    } else {
        end_index
    };

    start = start.max(0);
    end = end.clamp(0, len - 1);

    if start >= len {
        return Err("Start index is out of bounds");
    }

    if start > end {
        return Err("Start index is bigger than end index after processing");
    }

    Ok((start as usize, end as usize))
}
