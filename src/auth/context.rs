//! Per-request authentication context.
//!
//! An upstream authentication layer (OIDC session middleware, token
//! verifier, ...) inserts an [`AuthContext`] into request extensions before
//! the sync middleware runs. A request without one is treated as anonymous.

use crate::auth::claims::IdentityClaims;

/// Authentication outcome established by the upstream identity layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    Anonymous,
    Authenticated(IdentityClaims),
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Authenticated(_))
    }

    /// Claims for the authenticated caller, if any.
    pub fn claims(&self) -> Option<&IdentityClaims> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(claims) => Some(claims),
        }
    }
}
