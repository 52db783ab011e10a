//! Read side of the ledger plus demo enqueueing.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use common::RankingOrder;

use crate::ledger::DemoStatus;
use crate::models;

pub async fn get_player_by_name(
    conn: &mut AsyncPgConnection,
    name: &str,
) -> QueryResult<Option<models::Player>> {
    crate::schema::players::dsl::players
        .filter(crate::schema::players::dsl::name.eq(name))
        .select(models::Player::as_select())
        .first(conn)
        .await
        .optional()
}

type PlayerQuery = crate::schema::players::BoxedQuery<
    'static,
    diesel::pg::Pg,
    diesel::dsl::SqlTypeOf<diesel::dsl::AsSelect<models::Player, diesel::pg::Pg>>,
>;

/// Players with no deaths have no kd ratio and rank last by it.
pub fn top_players_query(limit: i64, order: RankingOrder) -> PlayerQuery {
    let query = crate::schema::players::dsl::players
        .select(models::Player::as_select())
        .limit(limit)
        .into_boxed();

    match order {
        RankingOrder::Rating => query.order((
            crate::schema::players::dsl::rating.desc(),
            crate::schema::players::dsl::id.asc(),
        )),
        RankingOrder::KdRatio => query.order((
            crate::schema::players::dsl::kd_ratio.desc().nulls_last(),
            crate::schema::players::dsl::id.asc(),
        )),
    }
}

pub async fn get_top_players(
    conn: &mut AsyncPgConnection,
    limit: i64,
    order: RankingOrder,
) -> QueryResult<Vec<models::Player>> {
    top_players_query(limit, order).load(conn).await
}

pub async fn get_badges_for_player(
    conn: &mut AsyncPgConnection,
    player_id: i64,
) -> QueryResult<Vec<models::Badge>> {
    crate::schema::badges::dsl::badges
        .filter(crate::schema::badges::dsl::player_id.eq(player_id))
        .order((
            crate::schema::badges::dsl::category.desc(),
            crate::schema::badges::dsl::id.asc(),
        ))
        .select(models::Badge::as_select())
        .load(conn)
        .await
}

pub async fn get_recent_processed_demos(
    conn: &mut AsyncPgConnection,
    limit: i64,
) -> QueryResult<Vec<models::Demo>> {
    crate::schema::demos::dsl::demos
        .filter(crate::schema::demos::dsl::status.eq(DemoStatus::Processed.as_str()))
        .order((
            crate::schema::demos::dsl::processed_at.desc().nulls_last(),
            crate::schema::demos::dsl::id.desc(),
        ))
        .limit(limit)
        .select(models::Demo::as_select())
        .load(conn)
        .await
}

pub async fn get_heatmaps_for_player(
    conn: &mut AsyncPgConnection,
    player_id: i64,
) -> QueryResult<Vec<models::Heatmap>> {
    crate::schema::heatmaps::dsl::heatmaps
        .filter(crate::schema::heatmaps::dsl::player_id.eq(player_id))
        .order(crate::schema::heatmaps::dsl::map_name.asc())
        .select(models::Heatmap::as_select())
        .load(conn)
        .await
}

/// Registers a demo file as pending.
pub async fn enqueue_demo(
    conn: &mut AsyncPgConnection,
    file_path: &str,
) -> QueryResult<models::Demo> {
    diesel::dsl::insert_into(crate::schema::demos::dsl::demos)
        .values(models::NewDemo { file_path })
        .returning(models::Demo::as_returning())
        .get_result(conn)
        .await
}
