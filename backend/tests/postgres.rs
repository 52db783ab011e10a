//! Ledger behaviour against a real database.
//!
//! These need a scratch Postgres database in `DATABASE_URL`:
//! `cargo test -p backend --test postgres -- --ignored --test-threads=1`

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pretty_assertions::assert_eq;

use backend::decoder::{DecodeError, Decoder};
use backend::ledger::{DemoStatus, Ledger, PgLedger, StoreError};
use backend::pipeline::{Outcome, Pipeline};
use stats::badges::BadgeCategory;

const REPORT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/report.json");

struct FixtureDecoder;

#[async_trait::async_trait]
impl Decoder for FixtureDecoder {
    async fn decode(&self, _: &std::path::Path) -> Result<Vec<u8>, DecodeError> {
        Ok(std::fs::read(REPORT).unwrap())
    }
}

async fn setup() -> backend::Pool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = backend::connect(&url).await.unwrap();
    backend::run_migrations(&pool).await.unwrap();

    let mut conn = pool.get().await.unwrap();
    diesel::delete(backend::schema::game_history::table).execute(&mut conn).await.unwrap();
    diesel::delete(backend::schema::badges::table).execute(&mut conn).await.unwrap();
    diesel::delete(backend::schema::heatmaps::table).execute(&mut conn).await.unwrap();
    diesel::delete(backend::schema::players::table).execute(&mut conn).await.unwrap();
    diesel::delete(backend::schema::demos::table).execute(&mut conn).await.unwrap();
    drop(conn);

    pool
}

async fn enqueue(pool: &backend::Pool, path: &str) -> i64 {
    let mut conn = pool.get().await.unwrap();
    backend::queries::enqueue_demo(&mut conn, path).await.unwrap().id
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn processes_fixture_report() {
    let pool = setup().await;
    let demo_id = enqueue(&pool, "/demos/nuke.dem").await;

    let outcome = Pipeline::new(Box::new(FixtureDecoder)).run_once(&pool).await.unwrap();
    assert_eq!(
        Outcome::Processed {
            demo_id,
            players: 3,
            failed_players: Vec::new()
        },
        outcome
    );

    let mut conn = pool.get().await.unwrap();

    let excel = backend::queries::get_player_by_name(&mut conn, "Excel")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(28, excel.kills);
    assert_eq!(Some(28.0 / 11.0), excel.kd_ratio);
    assert_eq!(Some(1400.0), excel.money_saved);
    assert!((excel.rating - 1010.17).abs() < 1e-9);

    let lol3rrr = backend::queries::get_player_by_name(&mut conn, "Lol3rrr")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(None, lol3rrr.kd_ratio);
    assert_eq!(None, lol3rrr.entry_kills);

    let badges = backend::queries::get_badges_for_player(&mut conn, excel.id).await.unwrap();
    assert_eq!(46, badges.len());
    assert_eq!(
        42,
        badges
            .iter()
            .filter(|b| b.category == BadgeCategory::Unique.as_str())
            .count()
    );

    let recent = backend::queries::get_recent_processed_demos(&mut conn, 10).await.unwrap();
    assert_eq!(vec![demo_id], recent.iter().map(|d| d.id).collect::<Vec<_>>());
    assert!(recent[0].processed_at.is_some());

    let top = backend::queries::get_top_players(&mut conn, 10, common::RankingOrder::KdRatio)
        .await
        .unwrap();
    assert_eq!(
        vec!["Excel", "Der Porzellan König", "Lol3rrr"],
        top.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn claimed_demo_is_invisible_to_other_transactions() {
    let pool = setup().await;
    let demo_id = enqueue(&pool, "/demos/claimed.dem").await;

    let mut first = pool.get().await.unwrap();
    let mut second = pool.get().await.unwrap();

    first
        .transaction::<_, StoreError, _>(|first| {
            async move {
                let claimed = PgLedger::new(first).claim_next_demo().await?;
                assert_eq!(Some(demo_id), claimed.map(|d| d.id));

                let other = second
                    .transaction::<_, StoreError, _>(|second| {
                        async move { PgLedger::new(second).claim_next_demo().await }.scope_boxed()
                    })
                    .await?;
                assert_eq!(None, other);

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn failed_write_does_not_poison_the_run() {
    let pool = setup().await;
    let demo_id = enqueue(&pool, "/demos/dup.dem").await;

    let mut conn = pool.get().await.unwrap();
    conn.transaction::<_, StoreError, _>(|conn| {
        async move {
            let mut ledger = PgLedger::new(conn);
            ledger.claim_next_demo().await?;

            ledger.create_player("Excel", None).await?;
            assert!(matches!(
                ledger.create_player("Excel", None).await,
                Err(StoreError::DuplicatePlayer(_))
            ));

            // the savepoint kept the transaction usable
            assert!(ledger.find_player_by_name("Excel").await?.is_some());
            ledger.finish_demo(demo_id, DemoStatus::Processed).await?;

            assert!(matches!(
                ledger.finish_demo(demo_id, DemoStatus::Failed).await,
                Err(StoreError::InvalidTransition(_))
            ));

            Ok(())
        }
        .scope_boxed()
    })
    .await
    .unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn badge_replacement_is_idempotent() {
    let pool = setup().await;
    let pipeline = Pipeline::new(Box::new(FixtureDecoder));

    let first = enqueue(&pool, "/demos/first.dem").await;
    pipeline.run_once(&pool).await.unwrap();
    enqueue(&pool, "/demos/second.dem").await;
    pipeline.run_once(&pool).await.unwrap();

    let mut conn = pool.get().await.unwrap();
    let excel = backend::queries::get_player_by_name(&mut conn, "Excel")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(56, excel.kills);

    let badges = backend::queries::get_badges_for_player(&mut conn, excel.id).await.unwrap();
    assert_eq!(46, badges.len());

    let history: i64 = backend::schema::game_history::table
        .filter(backend::schema::game_history::dsl::demo_id.eq(first))
        .count()
        .get_result(&mut conn)
        .await
        .unwrap();
    assert_eq!(3, history);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn rejected_rating_does_not_poison_the_run() {
    let pool = setup().await;
    let demo_id = enqueue(&pool, "/demos/rating.dem").await;

    let mut conn = pool.get().await.unwrap();
    conn.transaction::<_, StoreError, _>(|conn| {
        async move {
            let mut ledger = PgLedger::new(conn);
            ledger.claim_next_demo().await?;

            let player = ledger.create_player("Excel", None).await?;
            // violates the rating >= 0 check
            assert!(matches!(
                ledger.update_rating(player.id, -1.0).await,
                Err(StoreError::Diesel(_))
            ));

            ledger.update_rating(player.id, 990.0).await?;
            ledger.finish_demo(demo_id, DemoStatus::Processed).await?;

            Ok(())
        }
        .scope_boxed()
    })
    .await
    .unwrap();

    let excel = backend::queries::get_player_by_name(&mut conn, "Excel")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(990.0, excel.rating);
}
