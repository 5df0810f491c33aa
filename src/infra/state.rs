use std::sync::Arc;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::session::cache::{InMemorySessionCache, SessionCache};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and hosts)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    sessions: Option<Arc<dyn SessionCache>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: None,
            sessions: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Override the default in-memory session cache.
    pub fn with_sessions(mut self, sessions: Arc<dyn SessionCache>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(InMemorySessionCache::new()));

        if let Some(profile) = self.db_profile {
            let conn = connect_db(&db_url(profile)?).await?;
            Ok(AppState::new(conn, sessions))
        } else {
            Ok(AppState::without_db(sessions))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
