use sqlx::PgPool;

/// Shared application state injected into all route handlers via Axum extractors.
/// The pool is created once at startup and dropped at shutdown; nothing else
/// is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}
