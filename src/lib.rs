#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod session;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::IdentityClaims;
pub use auth::context::AuthContext;
pub use error::AppError;
pub use infra::db::connect_db;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::identity_sync::IdentitySync;
pub use repos::users::User;
pub use services::reconcile::{reconcile_user, resolve_user};
pub use session::cache::{InMemorySessionCache, SessionCache};
pub use state::app_state::AppState;

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::claims::*;
    pub use super::auth::context::*;
    pub use super::error::*;
    pub use super::middleware::identity_sync::*;
    pub use super::services::reconcile::*;
    pub use super::session::cache::*;
    pub use super::state::app_state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
