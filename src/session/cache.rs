//! Session cache for skipping repeated reconciliation.
//!
//! Once a session's user has been reconciled, the result is cached keyed by
//! session identifier so subsequent requests within that session avoid the
//! store round-trip. The cache is an injectable capability owned by
//! application state; the hosting environment drives its lifecycle (clear
//! on shutdown, periodic idle eviction).

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::repos::users::User;

/// Capability consumed by the sync middleware.
pub trait SessionCache: Send + Sync + 'static {
    /// Returns true when the session has already been reconciled, bumping
    /// its last-refreshed time as a side effect.
    fn check_and_refresh(&self, session_id: &str) -> bool;

    /// Registers the resolved user for a session.
    fn add_user(&self, session_id: &str, user: User);

    /// Resolved user for a session, if cached.
    fn user(&self, session_id: &str) -> Option<User>;

    fn remove(&self, session_id: &str);

    fn clear(&self);
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user: User,
    refreshed_at: Instant,
}

/// Process-wide in-memory session cache.
///
/// Concurrent requests bearing the same session identifier may race the
/// freshness check and both reconcile; the reconciliation's containment
/// check makes the duplicate converge, so no locking is layered here.
#[derive(Debug, Default)]
pub struct InMemorySessionCache {
    entries: DashMap<String, SessionEntry>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops sessions not refreshed within `max_idle`. Intended to be
    /// driven periodically by the hosting environment.
    pub fn evict_idle(&self, max_idle: Duration) {
        self.entries
            .retain(|_, entry| entry.refreshed_at.elapsed() <= max_idle);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionCache for InMemorySessionCache {
    fn check_and_refresh(&self, session_id: &str) -> bool {
        match self.entries.get_mut(session_id) {
            Some(mut entry) => {
                entry.refreshed_at = Instant::now();
                true
            }
            None => false,
        }
    }

    fn add_user(&self, session_id: &str, user: User) {
        self.entries.insert(
            session_id.to_owned(),
            SessionEntry {
                user,
                refreshed_at: Instant::now(),
            },
        );
    }

    fn user(&self, session_id: &str) -> Option<User> {
        self.entries.get(session_id).map(|entry| entry.user.clone())
    }

    fn remove(&self, session_id: &str) {
        self.entries.remove(session_id);
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        User {
            id,
            name: "Ann".to_string(),
            email: Some("a@x.com".to_string()),
            uuid: "auth0|42".to_string(),
            phone: None,
        }
    }

    #[test]
    fn unknown_session_is_not_fresh() {
        let cache = InMemorySessionCache::new();
        assert!(!cache.check_and_refresh("s1"));
        assert!(cache.user("s1").is_none());
    }

    #[test]
    fn added_session_reports_fresh_and_returns_user() {
        let cache = InMemorySessionCache::new();
        cache.add_user("s1", user(1));

        assert!(cache.check_and_refresh("s1"));
        assert_eq!(cache.user("s1").map(|u| u.id), Some(1));
        // A different session is unaffected
        assert!(!cache.check_and_refresh("s2"));
    }

    #[test]
    fn add_user_overwrites_previous_entry() {
        let cache = InMemorySessionCache::new();
        cache.add_user("s1", user(1));
        cache.add_user("s1", user(2));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.user("s1").map(|u| u.id), Some(2));
    }

    #[test]
    fn remove_and_clear_drop_entries() {
        let cache = InMemorySessionCache::new();
        cache.add_user("s1", user(1));
        cache.add_user("s2", user(2));

        cache.remove("s1");
        assert!(!cache.check_and_refresh("s1"));
        assert!(cache.check_and_refresh("s2"));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn evict_idle_keeps_recently_refreshed_sessions() {
        let cache = InMemorySessionCache::new();
        cache.add_user("s1", user(1));

        cache.evict_idle(Duration::from_secs(60));
        assert!(cache.check_and_refresh("s1"));

        cache.evict_idle(Duration::ZERO);
        assert!(!cache.check_and_refresh("s1"));
    }
}
