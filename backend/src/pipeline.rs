//! Demo intake: claim, decode, parse and fold a report into the ledger.

use std::time::Duration;

use diesel_async::scoped_futures::ScopedFutureExt;

use stats::badges::BadgeCategory;
use stats::report::{MalformedReport, PlayerRecord, StatReport};

use crate::decoder::{DecodeError, Decoder};
use crate::heatmap::{HeatmapError, HeatmapRenderer};
use crate::ledger::{ClaimedDemo, DemoStatus, Ledger, PgLedger, Player, StoreError};

/// Errors that abort the whole run. The transaction is rolled back and the
/// demo stays pending.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<diesel::result::Error> for PipelineError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Store(StoreError::Diesel(value))
    }
}

/// Reasons a demo ends up marked as failed.
#[derive(Debug, thiserror::Error)]
pub enum DemoFailure {
    #[error("decoding demo: {0}")]
    Decode(#[from] DecodeError),
    #[error("malformed report: {0}")]
    Malformed(#[from] MalformedReport),
}

/// Per-player failures. They are logged and do not affect other players.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("merging stats: {0}")]
    PlayerMerge(StoreError),
    #[error("updating rating: {0}")]
    RatingUpdate(StoreError),
    #[error("assigning {category:?} badges: {source}")]
    BadgeAssignment {
        category: BadgeCategory,
        source: StoreError,
    },
    #[error("recording match history: {0}")]
    HistoryInsert(StoreError),
    #[error("heatmap for {map}: {source}")]
    Heatmap { map: String, source: HeatmapError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was pending.
    Idle,
    Processed {
        demo_id: i64,
        players: usize,
        /// Players with at least one failed step.
        failed_players: Vec<String>,
    },
    Failed {
        demo_id: i64,
        reason: String,
    },
}

pub struct Pipeline {
    decoder: Box<dyn Decoder>,
    heatmaps: Option<HeatmapRenderer>,
}

impl Pipeline {
    pub fn new(decoder: Box<dyn Decoder>) -> Self {
        Self {
            decoder,
            heatmaps: None,
        }
    }

    pub fn with_heatmaps(mut self, renderer: HeatmapRenderer) -> Self {
        self.heatmaps = Some(renderer);
        self
    }

    /// Claims and processes one demo inside a single transaction.
    pub async fn run_once(&self, pool: &crate::Pool) -> Result<Outcome, PipelineError> {
        let mut conn = pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        conn.build_transaction()
            .run::<_, PipelineError, _>(|conn| {
                async move {
                    let mut ledger = PgLedger::new(conn);
                    self.process_next(&mut ledger).await
                }
                .scope_boxed()
            })
            .await
    }

    /// Keeps processing demos, sleeping for `interval` whenever the queue is
    /// empty or a run fails.
    pub async fn watch(&self, pool: &crate::Pool, interval: Duration) {
        loop {
            match self.run_once(pool).await {
                Ok(Outcome::Idle) => {
                    tokio::time::sleep(interval).await;
                }
                Ok(outcome) => {
                    tracing::debug!("Finished run: {:?}", outcome);
                }
                Err(e) => {
                    tracing::error!("Processing demo: {}", e);
                    tokio::time::sleep(interval).await;
                }
            };
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn process_next<L>(&self, ledger: &mut L) -> Result<Outcome, PipelineError>
    where
        L: Ledger + ?Sized,
    {
        let demo = match ledger.claim_next_demo().await? {
            Some(d) => d,
            None => return Ok(Outcome::Idle),
        };

        tracing::info!(demo_id = demo.id, path = ?demo.file_path, "Processing demo");

        let report = match self.load_report(&demo).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(demo_id = demo.id, path = ?demo.file_path, "Rejecting demo: {}", e);

                ledger.finish_demo(demo.id, DemoStatus::Failed).await?;
                return Ok(Outcome::Failed {
                    demo_id: demo.id,
                    reason: e.to_string(),
                });
            }
        };

        let mut failed_players = Vec::new();
        for (name, record) in report.players.iter() {
            let errors = self.ingest_player(ledger, &demo, name, record).await;
            if errors.is_empty() {
                continue;
            }

            for error in errors.iter() {
                tracing::error!(demo_id = demo.id, path = ?demo.file_path, player = %name, "{}", error);
            }
            failed_players.push(name.clone());
        }

        ledger.finish_demo(demo.id, DemoStatus::Processed).await?;

        tracing::info!(
            demo_id = demo.id,
            "Processed {} players, {} with errors",
            report.players.len(),
            failed_players.len()
        );

        Ok(Outcome::Processed {
            demo_id: demo.id,
            players: report.players.len(),
            failed_players,
        })
    }

    async fn load_report(&self, demo: &ClaimedDemo) -> Result<StatReport, DemoFailure> {
        let raw = self.decoder.decode(&demo.file_path).await?;
        Ok(stats::report::parse(&raw)?)
    }

    async fn ingest_player<L>(
        &self,
        ledger: &mut L,
        demo: &ClaimedDemo,
        name: &str,
        record: &PlayerRecord,
    ) -> Vec<IngestError>
    where
        L: Ledger + ?Sized,
    {
        let mut errors = Vec::new();

        let player = match merge_player(ledger, name, record).await {
            Ok(p) => p,
            Err(e) => return vec![IngestError::PlayerMerge(e)],
        };

        let rating = stats::rating::compute_rating(
            player.rating,
            record.stats.kills,
            record.stats.deaths,
        );
        if let Err(e) = ledger.update_rating(player.id, rating).await {
            errors.push(IngestError::RatingUpdate(e));
        }

        for category in [BadgeCategory::Unique, BadgeCategory::Generic] {
            let badges = stats::badges::evaluate(category, &player.totals);
            if let Err(source) = ledger.replace_badges(player.id, category, &badges).await {
                errors.push(IngestError::BadgeAssignment { category, source });
            }
        }

        if let Err(e) = ledger.record_match(demo.id, player.id, &record.stats).await {
            errors.push(IngestError::HistoryInsert(e));
        }

        if let Some(renderer) = self.heatmaps.as_ref() {
            let player_id = player.id;
            let rendered = futures::future::join_all(record.heatmaps.iter().map(
                |(map, samples)| async move { (map, renderer.render(player_id, map, samples).await) },
            ))
            .await;

            for (map, result) in rendered {
                let stored = match result {
                    Ok(path) => ledger
                        .record_heatmap(player_id, map, &path.to_string_lossy())
                        .await
                        .map_err(HeatmapError::from),
                    Err(e) => Err(e),
                };

                if let Err(source) = stored {
                    errors.push(IngestError::Heatmap {
                        map: map.clone(),
                        source,
                    });
                }
            }
        }

        errors
    }
}

/// Resolves the player and folds the match into their totals. The returned
/// player carries the post-merge totals and the pre-merge rating.
async fn merge_player<L>(
    ledger: &mut L,
    name: &str,
    record: &PlayerRecord,
) -> Result<Player, StoreError>
where
    L: Ledger + ?Sized,
{
    let player = crate::ledger::resolve_player(ledger, name, record.steam_id.as_deref()).await?;
    let mut merged = ledger.merge_stats(player.id, &record.stats).await?;
    merged.rating = player.rating;
    Ok(merged)
}
