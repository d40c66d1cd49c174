//! Session controller: the per-user disambiguation state machine.
//!
//! Turns successive `(user_id, event)` pairs into structured replies.
//! States per user: idle (no session) → awaiting query (source chosen)
//! → awaiting selection (suggestions stored) → back to idle. Rendering
//! replies into chat markup is the embedding application's job.

use crate::config::ResolverConfig;
use crate::matcher::{self, SelectionMatch};
use crate::orchestrator;
use crate::session::{Session, SessionStore};
use crate::types::{Candidate, MemeDetail, Resolution, ScoredCandidate, Source};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::Mutex as TokioMutex;

/// An inbound user turn, already stripped of transport concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user picked a knowledge source; starts a fresh session.
    ChooseSource(Source),
    /// Free text: a fresh query, or a reply to offered suggestions.
    Query(String),
    /// Unconditional session abandonment.
    Reset,
}

/// The single reply produced for one inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Terminal: a fully resolved entry.
    Answer(MemeDetail),
    /// Ranked suggestion titles, capped for display; a selection reply
    /// is now awaited.
    Suggestions {
        /// Best-first titles, at most `suggestion_cap` of them.
        titles: Vec<String>,
    },
    /// Terminal: no candidates on either source.
    NotFound,
    /// Terminal: transport or parse failure on the deciding source.
    Unavailable {
        /// Human-readable failure description.
        reason: String,
    },
    /// A source was chosen; a query is now awaited.
    AwaitingQuery {
        /// The chosen source.
        source: Source,
    },
    /// The selection reply matched nothing (or tied); the stored
    /// candidates are kept and the user should pick again.
    RetrySelection,
    /// The session was cleared.
    Cleared,
}

/// State machine wrapping the orchestrator and the session store.
///
/// `handle` is `&self`, so the controller can sit behind an [`Arc`] with
/// each inbound event running on its own task. Events for the same user
/// are serialised in receipt order through a per-user FIFO lock — a new
/// command arriving mid-resolution waits for the previous turn to
/// finish, so a result is never delivered into a stale session state.
/// Different users proceed concurrently.
pub struct SessionController {
    store: SessionStore,
    config: ResolverConfig,
    default_source: Source,
    turn_locks: StdMutex<HashMap<u64, Arc<TokioMutex<()>>>>,
}

impl SessionController {
    /// Create a controller with its own session store. The default
    /// source, used for queries without a prior source choice, is
    /// Know Your Meme.
    pub fn new(config: ResolverConfig) -> Self {
        let store = SessionStore::new(config.session_ttl_seconds);
        Self {
            store,
            config,
            default_source: Source::KnowYourMeme,
            turn_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Override the source used for queries arriving without a session.
    pub fn with_default_source(mut self, source: Source) -> Self {
        self.default_source = source;
        self
    }

    /// The underlying session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Process one inbound event, returning exactly one reply.
    pub async fn handle(&self, user_id: u64, event: Event) -> Reply {
        let turn_lock = self.turn_lock(user_id);
        let _turn = turn_lock.lock().await;

        match event {
            Event::ChooseSource(source) => {
                self.store.set(user_id, Session::new(source)).await;
                Reply::AwaitingQuery { source }
            }
            Event::Reset => {
                self.store.remove(user_id).await;
                Reply::Cleared
            }
            Event::Query(text) => self.handle_query(user_id, text.trim()).await,
        }
    }

    fn turn_lock(&self, user_id: u64) -> Arc<TokioMutex<()>> {
        let mut locks = self
            .turn_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(TokioMutex::new(())))
            .clone()
    }

    async fn handle_query(&self, user_id: u64, text: &str) -> Reply {
        let session = self.store.get(user_id).await;

        if let Some(session) = &session {
            if let Some(candidates) = &session.suggestions {
                return self
                    .handle_selection(user_id, session.source, candidates, text)
                    .await;
            }
        }

        let source = session.map_or(self.default_source, |s| s.source);
        self.handle_search(user_id, source, text).await
    }

    /// A fresh query: resolve with fallback and act on the outcome tag.
    async fn handle_search(&self, user_id: u64, source: Source, text: &str) -> Reply {
        let resolution = match orchestrator::resolve(text, source, &self.config).await {
            Ok(resolution) => resolution,
            Err(e) => {
                return Reply::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        match resolution {
            Resolution::Detail(detail) => {
                self.store.remove(user_id).await;
                Reply::Answer(detail)
            }
            Resolution::Suggestions { source, items } => {
                let titles = items
                    .iter()
                    .take(self.config.suggestion_cap)
                    .map(|s| s.title.clone())
                    .collect();
                let stored = items.iter().map(ScoredCandidate::to_candidate).collect();
                self.store
                    .set(
                        user_id,
                        Session {
                            source,
                            suggestions: Some(stored),
                        },
                    )
                    .await;
                Reply::Suggestions { titles }
            }
            Resolution::NotFound => {
                self.store.remove(user_id).await;
                Reply::NotFound
            }
            Resolution::Unavailable { reason } => {
                self.store.remove(user_id).await;
                Reply::Unavailable { reason }
            }
        }
    }

    /// A reply to offered suggestions: strict-threshold match against
    /// the stored candidates; a failed attempt keeps them for the next
    /// try.
    async fn handle_selection(
        &self,
        user_id: u64,
        source: Source,
        candidates: &[Candidate],
        text: &str,
    ) -> Reply {
        match matcher::match_selection(text, candidates, self.config.selection_threshold) {
            SelectionMatch::Unique(index) => {
                let href = &candidates[index].href;
                let resolution =
                    match orchestrator::resolve_selection(source, href, &self.config).await {
                        Ok(resolution) => resolution,
                        Err(e) => {
                            return Reply::Unavailable {
                                reason: e.to_string(),
                            }
                        }
                    };
                self.store.remove(user_id).await;
                match resolution {
                    Resolution::Detail(detail) => Reply::Answer(detail),
                    Resolution::Unavailable { reason } => Reply::Unavailable { reason },
                    Resolution::NotFound | Resolution::Suggestions { .. } => Reply::NotFound,
                }
            }
            SelectionMatch::Ambiguous | SelectionMatch::NoMatch => Reply::RetrySelection,
        }
    }
}
