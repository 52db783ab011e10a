pub mod models;
pub mod schema;

pub mod decoder;
pub mod heatmap;
pub mod ledger;
pub mod pipeline;
pub mod queries;

pub mod api;
pub mod cli;

use ledger::StoreError;

pub type Pool = diesel_async::pooled_connection::bb8::Pool<diesel_async::AsyncPgConnection>;

pub const MIGRATIONS: diesel_async_migrations::EmbeddedMigrations =
    diesel_async_migrations::embed_migrations!("../migrations/");

pub async fn connect(database_url: &str) -> Result<Pool, StoreError> {
    let manager = diesel_async::pooled_connection::AsyncDieselConnectionManager::<
        diesel_async::AsyncPgConnection,
    >::new(database_url);

    Pool::builder()
        .build(manager)
        .await
        .map_err(|e| StoreError::Pool(e.to_string()))
}

pub async fn run_migrations(pool: &Pool) -> Result<(), StoreError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|e| StoreError::Pool(e.to_string()))?;

    MIGRATIONS
        .run_pending_migrations(&mut *conn)
        .await
        .map_err(|e| StoreError::Migration(e.to_string()))
}
