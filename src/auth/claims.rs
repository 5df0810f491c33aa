//! Identity-provider claims consumed by the sync middleware.

use serde::{Deserialize, Serialize};

/// Claims supplied by the upstream identity-provider integration for the
/// current authenticated caller.
///
/// The session identifier is always present once a session exists; the
/// remaining fields depend on what the provider released. Absence is
/// uniformly `None` — there is no distinction between a missing field and
/// an explicit null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Opaque session identifier (claims `sid`)
    pub session_id: String,
    /// Stable provider-assigned subject identifier (claims `sub`)
    pub subject: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl IdentityClaims {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            subject: None,
            name: None,
            email: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
