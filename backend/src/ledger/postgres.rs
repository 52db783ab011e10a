use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use stats::badges::{Badge, BadgeCategory};
use stats::StatLine;

use super::{ClaimedDemo, DemoStatus, Ledger, Player, StoreError};
use crate::models;

/// Postgres backed ledger.
///
/// The claim only holds while the surrounding transaction is open, so the
/// caller is expected to drive a whole run inside one transaction. Every
/// mutation runs in its own savepoint, a failed write for one player leaves
/// the rest of the transaction usable.
pub struct PgLedger<'c> {
    conn: &'c mut AsyncPgConnection,
}

impl<'c> PgLedger<'c> {
    pub fn new(conn: &'c mut AsyncPgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl Ledger for PgLedger<'_> {
    async fn claim_next_demo(&mut self) -> Result<Option<ClaimedDemo>, StoreError> {
        let query = crate::schema::demos::dsl::demos
            .filter(crate::schema::demos::dsl::status.eq(DemoStatus::Pending.as_str()))
            .order(crate::schema::demos::dsl::id.asc())
            .limit(1)
            .select(models::Demo::as_select())
            .for_update()
            .skip_locked();

        let mut results: Vec<models::Demo> = query.load(&mut *self.conn).await?;

        Ok(results.pop().map(|demo| ClaimedDemo {
            id: demo.id,
            file_path: demo.file_path.into(),
        }))
    }

    async fn finish_demo(&mut self, demo_id: i64, status: DemoStatus) -> Result<(), StoreError> {
        if status == DemoStatus::Pending {
            return Err(StoreError::InvalidTransition(demo_id));
        }

        let query = diesel::dsl::update(crate::schema::demos::dsl::demos)
            .filter(crate::schema::demos::dsl::id.eq(demo_id))
            .filter(crate::schema::demos::dsl::status.eq(DemoStatus::Pending.as_str()))
            .set((
                crate::schema::demos::dsl::status.eq(status.as_str()),
                crate::schema::demos::dsl::processed_at.eq(diesel::dsl::now.nullable()),
            ));

        match query.execute(&mut *self.conn).await? {
            1 => Ok(()),
            _ => Err(StoreError::InvalidTransition(demo_id)),
        }
    }

    async fn find_player_by_name(&mut self, name: &str) -> Result<Option<Player>, StoreError> {
        let player = crate::schema::players::dsl::players
            .filter(crate::schema::players::dsl::name.eq(name))
            .select(models::Player::as_select())
            .first(&mut *self.conn)
            .await
            .optional()?;

        Ok(player.map(Player::from))
    }

    async fn create_player(
        &mut self,
        name: &str,
        steam_id: Option<&str>,
    ) -> Result<Player, StoreError> {
        let result = self
            .conn
            .transaction::<models::Player, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::dsl::insert_into(crate::schema::players::dsl::players)
                        .values(models::NewPlayer { name, steam_id })
                        .returning(models::Player::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(player) => Ok(player.into()),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(StoreError::DuplicatePlayer(name.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn merge_stats(&mut self, player_id: i64, stats: &StatLine) -> Result<Player, StoreError> {
        let player = self
            .conn
            .transaction::<models::Player, StoreError, _>(|conn| {
                async move {
                    let current: models::Player = crate::schema::players::dsl::players
                        .find(player_id)
                        .select(models::Player::as_select())
                        .for_update()
                        .get_result(conn)
                        .await
                        .optional()?
                        .ok_or(StoreError::UnknownPlayer(player_id))?;

                    let mut totals = current.stat_line();
                    totals.merge(stats)?;

                    let changes =
                        models::PlayerTotals::new(&totals, chrono::Utc::now().naive_utc());

                    let updated =
                        diesel::dsl::update(crate::schema::players::dsl::players.find(player_id))
                            .set(&changes)
                            .returning(models::Player::as_returning())
                            .get_result(conn)
                            .await?;

                    Ok(updated)
                }
                .scope_boxed()
            })
            .await?;

        Ok(player.into())
    }

    async fn update_rating(&mut self, player_id: i64, rating: f64) -> Result<(), StoreError> {
        let updated = self
            .conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::dsl::update(crate::schema::players::dsl::players.find(player_id))
                        .set(crate::schema::players::dsl::rating.eq(rating))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await?;

        match updated {
            0 => Err(StoreError::UnknownPlayer(player_id)),
            _ => Ok(()),
        }
    }

    async fn replace_badges(
        &mut self,
        player_id: i64,
        category: BadgeCategory,
        badges: &[Badge],
    ) -> Result<(), StoreError> {
        let rows: Vec<models::NewBadge<'_>> = badges
            .iter()
            .map(|badge| models::NewBadge {
                player_id,
                category: category.as_str(),
                name: badge.name,
                glyph: badge.glyph,
            })
            .collect();

        self.conn
            .transaction::<(), diesel::result::Error, _>(|conn| {
                async move {
                    diesel::dsl::delete(crate::schema::badges::dsl::badges)
                        .filter(crate::schema::badges::dsl::player_id.eq(player_id))
                        .filter(crate::schema::badges::dsl::category.eq(category.as_str()))
                        .execute(conn)
                        .await?;

                    if !rows.is_empty() {
                        diesel::dsl::insert_into(crate::schema::badges::dsl::badges)
                            .values(&rows)
                            .execute(conn)
                            .await?;
                    }

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        Ok(())
    }

    async fn record_match(
        &mut self,
        demo_id: i64,
        player_id: i64,
        stats: &StatLine,
    ) -> Result<(), StoreError> {
        let row = models::NewGameHistory::new(demo_id, player_id, stats);

        self.conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::dsl::insert_into(crate::schema::game_history::dsl::game_history)
                        .values(&row)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await?;

        Ok(())
    }

    async fn record_heatmap(
        &mut self,
        player_id: i64,
        map_name: &str,
        image_path: &str,
    ) -> Result<(), StoreError> {
        let row = models::NewHeatmap {
            player_id,
            map_name,
            image_path,
        };

        self.conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::dsl::insert_into(crate::schema::heatmaps::dsl::heatmaps)
                        .values(&row)
                        .on_conflict((
                            crate::schema::heatmaps::dsl::player_id,
                            crate::schema::heatmaps::dsl::map_name,
                        ))
                        .do_update()
                        .set((
                            crate::schema::heatmaps::dsl::image_path
                                .eq(diesel::upsert::excluded(crate::schema::heatmaps::dsl::image_path)),
                            crate::schema::heatmaps::dsl::rendered_at.eq(diesel::dsl::now),
                        ))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await?;

        Ok(())
    }
}
