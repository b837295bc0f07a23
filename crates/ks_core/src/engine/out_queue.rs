//! Out/Revival Queue
//!
//! FIFO of eliminated player ids per side. Elimination appends; a scoring
//! raid revives from the front, earliest elimination first. An id is queued
//! iff that player is currently out and unrevived, never twice.

use std::collections::VecDeque;

use serde::Serialize;

use crate::models::PlayerId;

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutQueue {
    queue: VecDeque<PlayerId>,
}

impl OutQueue {
    /// Append an elimination. Returns false (and leaves the queue alone) if
    /// the id is already waiting, so a double report cannot corrupt it.
    pub fn push(&mut self, id: PlayerId) -> bool {
        if self.queue.contains(&id) {
            return false;
        }
        self.queue.push_back(id);
        true
    }

    /// Pop up to `count` ids from the front, oldest elimination first.
    pub fn revive(&mut self, count: usize) -> Vec<PlayerId> {
        let n = count.min(self.queue.len());
        self.queue.drain(..n).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.queue.contains(&id)
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.queue.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
