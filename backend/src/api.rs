pub mod demos;
pub mod players;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct ApiState {
    pool: crate::Pool,
}

impl ApiState {
    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        axum::http::StatusCode,
    > {
        self.pool.get().await.map_err(|e| {
            tracing::error!("Getting DB connection: {:?}", e);
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        })
    }
}

fn internal_error(e: diesel::result::Error) -> axum::http::StatusCode {
    tracing::error!("Querying DB: {:?}", e);
    axum::http::StatusCode::INTERNAL_SERVER_ERROR
}

/// Clamps a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub fn router(pool: crate::Pool) -> axum::Router {
    axum::Router::new()
        .nest("/players", players::router())
        .nest("/demos", demos::router())
        .with_state(ApiState { pool })
}
