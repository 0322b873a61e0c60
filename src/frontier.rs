// src/frontier.rs

//! Frontier management: the pending-work stack and the visited set.

use std::collections::HashSet;

use crate::storage::Checkpoint;

/// Depth-first frontier over account usernames.
///
/// Pending work is consumed last-in-first-out, so traversal expands the most
/// recently discovered accounts first. The visited set only ever grows; a
/// username is enqueued at most once across the lifetime of all runs,
/// including usernames restored from a prior checkpoint.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: Vec<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a frontier from a checkpoint.
    ///
    /// Restored pending entries stay pending even though they are already
    /// members of the visited set.
    pub fn restore(checkpoint: Checkpoint) -> Self {
        let Checkpoint {
            mut visited,
            frontier,
        } = checkpoint;

        let mut pending = Vec::with_capacity(frontier.len());
        let mut queued: HashSet<String> = HashSet::new();
        for user in frontier {
            if queued.insert(user.clone()) {
                visited.insert(user.clone());
                pending.push(user);
            }
        }

        Self { pending, visited }
    }

    /// Schedule a username unless it was ever seen before.
    ///
    /// Returns whether the username was actually enqueued.
    pub fn push(&mut self, user: String) -> bool {
        if self.visited.contains(&user) {
            return false;
        }
        self.visited.insert(user.clone());
        self.pending.push(user);
        true
    }

    /// Remove and return the most recently added pending username.
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop()
    }

    /// Number of pending usernames.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of usernames ever scheduled.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Consume the frontier into a checkpoint snapshot.
    pub fn into_checkpoint(self) -> Checkpoint {
        Checkpoint {
            visited: self.visited,
            frontier: self.pending,
        }
    }
}
