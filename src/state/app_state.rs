use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::session::cache::{InMemorySessionCache, SessionCache};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Session cache shared across requests
    sessions: Arc<dyn SessionCache>,
}

impl AppState {
    /// Create a new AppState with the given database connection and session cache
    pub fn new(db: DatabaseConnection, sessions: Arc<dyn SessionCache>) -> Self {
        Self {
            db: Some(db),
            sessions,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(sessions: Arc<dyn SessionCache>) -> Self {
        Self { db: None, sessions }
    }

    /// Create a new AppState with a fresh in-memory session cache
    pub fn with_default_cache(db: DatabaseConnection) -> Self {
        Self::new(db, Arc::new(InMemorySessionCache::new()))
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn sessions(&self) -> &Arc<dyn SessionCache> {
        &self.sessions
    }
}
