//! Storage seam used by the intake pipeline.
//!
//! A [`Ledger`] wraps a single connection. The pipeline claims a demo and
//! performs every per-player write through the same ledger, so for Postgres
//! the whole run lives in one transaction that holds the demo's row lock.

use std::path::PathBuf;

use stats::badges::{Badge, BadgeCategory};
use stats::StatLine;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgLedger;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Diesel(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(String),
    #[error("applying migrations: {0}")]
    Migration(String),
    #[error("player {0:?} already exists")]
    DuplicatePlayer(String),
    #[error("player {0} does not exist")]
    UnknownPlayer(i64),
    #[error("demo {0} is not pending")]
    InvalidTransition(i64),
    #[error("unexpected stored value: {0}")]
    Corrupt(String),
    #[error("merging totals: {0}")]
    Overflow(#[from] stats::CounterOverflow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoStatus {
    Pending,
    Processed,
    Failed,
}

impl DemoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedDemo {
    pub id: i64,
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub steam_id: Option<String>,
    pub totals: StatLine,
    pub rating: f64,
}

impl From<crate::models::Player> for Player {
    fn from(row: crate::models::Player) -> Self {
        Self {
            totals: row.stat_line(),
            id: row.id,
            name: row.name,
            steam_id: row.steam_id,
            rating: row.rating,
        }
    }
}

#[async_trait::async_trait]
pub trait Ledger: Send {
    /// Claims the oldest pending demo. The claim lasts until the demo is
    /// finished or the ledger is dropped; concurrent claimers never see it.
    async fn claim_next_demo(&mut self) -> Result<Option<ClaimedDemo>, StoreError>;

    /// Moves a pending demo to its terminal status.
    async fn finish_demo(&mut self, demo_id: i64, status: DemoStatus) -> Result<(), StoreError>;

    async fn find_player_by_name(&mut self, name: &str) -> Result<Option<Player>, StoreError>;

    /// Fails with [`StoreError::DuplicatePlayer`] if the name is taken.
    async fn create_player(
        &mut self,
        name: &str,
        steam_id: Option<&str>,
    ) -> Result<Player, StoreError>;

    /// Folds one match into the player's totals and returns the updated
    /// player. Totals that would overflow fail with
    /// [`StoreError::Overflow`] and are left unchanged.
    async fn merge_stats(&mut self, player_id: i64, stats: &StatLine) -> Result<Player, StoreError>;

    async fn update_rating(&mut self, player_id: i64, rating: f64) -> Result<(), StoreError>;

    /// Replaces every badge of `category` for the player in one step.
    async fn replace_badges(
        &mut self,
        player_id: i64,
        category: BadgeCategory,
        badges: &[Badge],
    ) -> Result<(), StoreError>;

    async fn record_match(
        &mut self,
        demo_id: i64,
        player_id: i64,
        stats: &StatLine,
    ) -> Result<(), StoreError>;

    async fn record_heatmap(
        &mut self,
        player_id: i64,
        map_name: &str,
        image_path: &str,
    ) -> Result<(), StoreError>;
}

/// Looks the player up by name and creates them if missing. Losing the
/// creation race to another worker falls back to the lookup.
#[tracing::instrument(skip(ledger))]
pub async fn resolve_player<L>(
    ledger: &mut L,
    name: &str,
    steam_id: Option<&str>,
) -> Result<Player, StoreError>
where
    L: Ledger + ?Sized,
{
    if let Some(player) = ledger.find_player_by_name(name).await? {
        return Ok(player);
    }

    match ledger.create_player(name, steam_id).await {
        Ok(player) => {
            tracing::info!("Created player {:?}", name);
            Ok(player)
        }
        Err(StoreError::DuplicatePlayer(_)) => {
            tracing::debug!("Player {:?} was created concurrently", name);

            ledger
                .find_player_by_name(name)
                .await?
                .ok_or_else(|| StoreError::Corrupt(format!("player {:?} vanished", name)))
        }
        Err(e) => Err(e),
    }
}
