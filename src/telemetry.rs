use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Structured JSON logging for hosting applications. Call once at startup.
///
/// Honors `RUST_LOG`; the defaults keep this crate's reconciliation events
/// at debug while quieting the database drivers.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,auth_sync=debug,sqlx=warn,sea_orm=warn"));

    let fmt_layer = fmt::layer().with_target(true).with_ansi(false).json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
