//! Identity reconciliation: maps a provider subject to an internal user
//! record, creating or updating the record as needed.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::users;
use crate::repos::users::User;

/// Redacts a subject identifier for logging purposes.
/// Shows only the first 4 characters followed by asterisks.
fn redact_subject(subject: &str) -> String {
    if subject.len() <= 4 {
        "*".repeat(subject.len())
    } else {
        format!("{}***", &subject[..4])
    }
}

/// Looks up the user matching a subject identifier and email.
///
/// A record matches when its stored email equals `email` (both absent also
/// counts as equal) or its uuid column contains `subject`. Pure lookup, no
/// mutation; absence is `Ok(None)`.
pub async fn resolve_user<C: ConnectionTrait + Send + Sync>(
    subject: &str,
    email: Option<&str>,
    conn: &C,
) -> Result<Option<User>, AppError> {
    users::find_by_email_or_subject(conn, subject, email).await
}

/// Ensures a user record exists for the given identity, returning it.
///
/// Idempotent: once a record's uuid column contains the subject, repeated
/// calls return the record without mutation.
pub async fn reconcile_user<C: ConnectionTrait + Send + Sync>(
    subject: &str,
    name: Option<&str>,
    email: Option<&str>,
    conn: &C,
) -> Result<User, AppError> {
    match resolve_user(subject, email, conn).await? {
        None => {
            let user = users::create_user(conn, name.unwrap_or(""), email, subject).await?;
            info!(
                user_id = user.id,
                subject = %redact_subject(subject),
                email = %Redacted(email.unwrap_or("<none>")),
                "Created user for first-seen subject"
            );
            Ok(user)
        }
        Some(user) if user.has_subject(subject) => {
            debug!(
                user_id = user.id,
                subject = %redact_subject(subject),
                "Repeat login, subject already linked"
            );
            Ok(user)
        }
        Some(user) => {
            let updated = users::append_subject(conn, &user, subject).await?;
            info!(
                user_id = updated.id,
                subject = %redact_subject(subject),
                "Linked additional subject to existing user"
            );
            Ok(updated)
        }
    }
}
