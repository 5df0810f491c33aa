//! User repository functions (generic over ConnectionTrait).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::users;
use crate::error::AppError;

/// Delimiter between subject identifiers in the uuid column.
pub const SUBJECT_DELIMITER: &str = ", ";

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    /// Delimited list of provider subject identifiers
    pub uuid: String,
    pub phone: Option<String>,
}

impl User {
    /// Whether this record already carries the given subject identifier.
    pub fn has_subject(&self, subject: &str) -> bool {
        self.uuid.contains(subject)
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            uuid: model.uuid,
            phone: model.phone,
        }
    }
}

/// Finds the first user whose email equals `email` or whose uuid column
/// contains `subject`.
///
/// `email = None` matches rows with a NULL email, mirroring the degenerate
/// equality of two absent emails. An empty subject never matches by
/// containment (a `LIKE '%%'` would match every row). When several rows
/// satisfy the predicate the lowest id wins, so the result does not depend
/// on store row order.
pub async fn find_by_email_or_subject<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: &str,
    email: Option<&str>,
) -> Result<Option<User>, AppError> {
    let mut filter = Condition::any();
    filter = match email {
        Some(email) => filter.add(users::Column::Email.eq(email)),
        None => filter.add(users::Column::Email.is_null()),
    };
    if !subject.is_empty() {
        filter = filter.add(users::Column::Uuid.contains(subject));
    }

    let user = users::Entity::find()
        .filter(filter)
        .order_by_asc(users::Column::Id)
        .one(conn)
        .await?;

    Ok(user.map(User::from))
}

/// Creates a user for a subject seen for the first time.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    email: Option<&str>,
    subject: &str,
) -> Result<User, AppError> {
    let user_active = users::ActiveModel {
        id: NotSet, // Let database auto-generate
        name: Set(name.to_owned()),
        email: Set(email.map(str::to_owned)),
        uuid: Set(subject.to_owned()),
        phone: NotSet,
    };

    let user = user_active.insert(conn).await?;
    Ok(User::from(user))
}

/// Appends `subject` to the user's uuid column.
///
/// The update payload carries every pre-existing field unchanged; only the
/// uuid value differs, with the new subject joined by [`SUBJECT_DELIMITER`].
pub async fn append_subject<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: &User,
    subject: &str,
) -> Result<User, AppError> {
    let user_active = users::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        uuid: Set(format!("{}{}{}", user.uuid, SUBJECT_DELIMITER, subject)),
        phone: Set(user.phone.clone()),
    };

    let user = user_active.update(conn).await?;
    Ok(User::from(user))
}
