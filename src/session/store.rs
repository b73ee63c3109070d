//! # Session State Store
//!
//! Resolver-private state keyed by `(SessionId, ResolverId)`.
//!
//! Entries are grouped per session inside a sharded [`DashMap`], so clearing a
//! session is a single removal that never touches another session's entries,
//! and writes for one session only contend with writes that land in the same
//! shard. There is no expiry: callers clear a session when its build ends.

use super::state::ResolverState;
use crate::constants::components;
use crate::models::SessionId;
use crate::registry::ResolverId;
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::debug;

/// Concurrent store of per-session resolver state
#[derive(Debug, Default)]
pub struct SessionStateStore {
    sessions: DashMap<SessionId, HashMap<ResolverId, ResolverState>>,
}

impl SessionStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State previously stored for this resolver in this session.
    ///
    /// Always `None` for [`SessionId::NONE`].
    pub fn get(&self, session: SessionId, resolver: ResolverId) -> Option<ResolverState> {
        if !session.is_cacheable() {
            return None;
        }

        self.sessions
            .get(&session)
            .and_then(|states| states.get(&resolver).cloned())
    }

    /// Store state for this resolver in this session, replacing any previous
    /// value. A no-op for [`SessionId::NONE`].
    pub fn set(&self, session: SessionId, resolver: ResolverId, state: ResolverState) {
        if !session.is_cacheable() {
            return;
        }

        // The shard stays write-locked while the inner map is updated, so a
        // concurrent clear of this session either runs entirely before or after.
        self.sessions
            .entry(session)
            .or_default()
            .insert(resolver, state);
    }

    /// Forget this resolver's state in this session
    pub fn remove(&self, session: SessionId, resolver: ResolverId) -> Option<ResolverState> {
        if !session.is_cacheable() {
            return None;
        }

        let removed = self
            .sessions
            .get_mut(&session)
            .and_then(|mut states| states.remove(&resolver));
        self.sessions.remove_if(&session, |_, states| states.is_empty());
        removed
    }

    /// Drop every resolver's state for `session`. Returns the number of entries
    /// removed; clearing an unknown session removes nothing.
    pub fn clear(&self, session: SessionId) -> usize {
        let removed = self
            .sessions
            .remove(&session)
            .map(|(_, states)| states.len())
            .unwrap_or(0);

        debug!(
            component = components::SESSION_STORE,
            session_id = %session,
            removed_entries = removed,
            "Cleared session state"
        );
        removed
    }

    pub fn contains_session(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    pub fn stats(&self) -> SessionStoreStats {
        let mut stats = SessionStoreStats::default();
        for states in self.sessions.iter() {
            stats.sessions += 1;
            stats.entries += states.len();
        }
        stats
    }
}

/// Size of the session store at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStoreStats {
    pub sessions: usize,
    pub entries: usize,
}
