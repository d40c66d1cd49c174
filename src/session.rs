//! Per-user disambiguation sessions.
//!
//! A [`Session`] exists from the moment a user picks a source until a
//! detail answer is delivered, the user resets, or the TTL expires.
//! The store is a bounded concurrent cache keyed by user id — no
//! module-level shared state; the controller owns an injected instance.

use crate::types::{Candidate, Source};
use moka::future::Cache;
use std::time::Duration;

/// Maximum number of concurrently tracked user sessions.
const MAX_SESSIONS: u64 = 10_000;

/// One user's disambiguation state.
///
/// `suggestions` is `None` while a query is awaited and `Some` once a
/// ranked candidate list has been offered. A stored list is never
/// mutated in place — a new search replaces the session wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The source whose listing produced the stored candidates, and the
    /// source used for the next fresh query.
    pub source: Source,
    /// Candidates offered to the user, awaiting a selection reply.
    pub suggestions: Option<Vec<Candidate>>,
}

impl Session {
    /// A fresh session for a chosen source, with no pending candidates.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            suggestions: None,
        }
    }
}

/// Concurrency-safe session store keyed by user id.
///
/// Backed by a bounded cache with a configurable idle TTL, so abandoned
/// sessions expire without an explicit reset. Creating a session for a
/// user who already has one overwrites it (last-write-wins).
pub struct SessionStore {
    sessions: Cache<u64, Session>,
}

impl SessionStore {
    /// Create a store whose sessions expire `ttl_seconds` after their
    /// last write. A TTL of 0 keeps sessions until explicitly removed.
    pub fn new(ttl_seconds: u64) -> Self {
        let mut builder = Cache::builder().max_capacity(MAX_SESSIONS);
        if ttl_seconds > 0 {
            builder = builder.time_to_live(Duration::from_secs(ttl_seconds));
        }
        Self {
            sessions: builder.build(),
        }
    }

    /// Look up a user's session.
    pub async fn get(&self, user_id: u64) -> Option<Session> {
        self.sessions.get(&user_id).await
    }

    /// Create or replace a user's session.
    pub async fn set(&self, user_id: u64, session: Session) {
        self.sessions.insert(user_id, session).await;
    }

    /// Drop a user's session, if any.
    pub async fn remove(&self, user_id: u64) {
        self.sessions.invalidate(&user_id).await;
    }
}
