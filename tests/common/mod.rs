#![allow(dead_code)]

// tests/common/mod.rs

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error, HttpMessage, HttpResponse};
use auth_sync::entities::users;
use auth_sync::{AppState, AuthContext, IdentityClaims, IdentitySync, InMemorySessionCache};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait};

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

const CREATE_USERS_TABLE: &str = "\
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL,
    email TEXT,
    uuid TEXT NOT NULL,
    phone TEXT
)";

/// In-memory SQLite connection with the users schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn sqlite_conn() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).min_connections(1);

    let conn = Database::connect(options).await.expect("connect sqlite");
    conn.execute_unprepared(CREATE_USERS_TABLE)
        .await
        .expect("create users table");
    conn
}

pub async fn sqlite_state() -> AppState {
    AppState::new(
        sqlite_conn().await,
        Arc::new(InMemorySessionCache::new()),
    )
}

pub async fn seed_user(
    conn: &DatabaseConnection,
    name: &str,
    email: Option<&str>,
    uuid: &str,
    phone: Option<&str>,
) -> i64 {
    let email_sql = match email {
        Some(e) => format!("'{e}'"),
        None => "NULL".to_string(),
    };
    let phone_sql = match phone {
        Some(p) => format!("'{p}'"),
        None => "NULL".to_string(),
    };
    conn.execute_unprepared(&format!(
        "INSERT INTO users (name, email, uuid, phone) VALUES ('{name}', {email_sql}, '{uuid}', {phone_sql})"
    ))
    .await
    .expect("seed user");

    all_users(conn)
        .await
        .last()
        .map(|u| u.id)
        .expect("seeded user id")
}

pub async fn all_users(conn: &DatabaseConnection) -> Vec<users::Model> {
    users::Entity::find().all(conn).await.expect("list users")
}

/// Claims for a fully-populated authenticated caller.
pub fn full_claims(sid: &str, sub: &str, name: &str, email: &str) -> IdentityClaims {
    IdentityClaims::new(sid)
        .with_subject(sub)
        .with_name(name)
        .with_email(email)
}

/// Builds a test app with the sync middleware and an upstream shim that
/// injects the given auth context, plus a probe route.
pub async fn sync_app(
    state: AppState,
    ctx: AuthContext,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(IdentitySync)
            .wrap_fn(move |req, srv| {
                req.extensions_mut().insert(ctx.clone());
                srv.call(req)
            })
            .route("/probe", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await
}

pub async fn probe<S>(app: &S) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::get().uri("/probe").to_request();
    test::call_service(app, req).await
}
