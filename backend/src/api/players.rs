use axum::extract::{Path, Query, State};
use base64::Engine;

use super::ApiState;

#[derive(Debug, serde::Deserialize)]
struct TopQuery {
    limit: Option<i64>,
    #[serde(default)]
    order: common::RankingOrder,
}

pub fn router() -> axum::Router<ApiState> {
    axum::Router::new()
        .route("/top", axum::routing::get(top))
        .route("/:name", axum::routing::get(profile))
        .route("/:name/badges", axum::routing::get(badges))
        .route("/:name/heatmaps", axum::routing::get(heatmaps))
}

pub fn summary(player: &crate::models::Player) -> common::player::PlayerSummary {
    common::player::PlayerSummary {
        id: player.id,
        name: player.name.clone(),
        kills: player.kills,
        deaths: player.deaths,
        headshots: player.headshots,
        assists: player.assists,
        kd_ratio: player.kd_ratio,
        rating: player.rating,
    }
}

fn badge(badge: crate::models::Badge) -> common::player::PlayerBadge {
    common::player::PlayerBadge {
        name: badge.name,
        glyph: badge.glyph,
        category: badge.category,
    }
}

async fn find_player(
    conn: &mut diesel_async::AsyncPgConnection,
    name: &str,
) -> Result<crate::models::Player, axum::http::StatusCode> {
    let player = crate::queries::get_player_by_name(conn, name)
        .await
        .map_err(super::internal_error)?;

    require_player(name, player)
}

fn require_player<T>(name: &str, player: Option<T>) -> Result<T, axum::http::StatusCode> {
    player.ok_or_else(|| {
        tracing::debug!("Unknown player {:?}", name);
        axum::http::StatusCode::NOT_FOUND
    })
}

#[tracing::instrument(skip(state))]
async fn top(
    State(state): State<ApiState>,
    Query(query): Query<TopQuery>,
) -> Result<axum::response::Json<Vec<common::player::PlayerSummary>>, axum::http::StatusCode> {
    let mut conn = state.connection().await?;

    let players =
        crate::queries::get_top_players(&mut conn, super::clamp_limit(query.limit), query.order)
            .await
            .map_err(super::internal_error)?;

    Ok(axum::response::Json(players.iter().map(summary).collect()))
}

#[tracing::instrument(skip(state))]
async fn profile(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<axum::response::Json<common::player::PlayerProfile>, axum::http::StatusCode> {
    let mut conn = state.connection().await?;

    let player = find_player(&mut conn, &name).await?;
    let badges = crate::queries::get_badges_for_player(&mut conn, player.id)
        .await
        .map_err(super::internal_error)?;

    let stats = player
        .stat_line()
        .behaviour
        .values()
        .into_iter()
        .filter_map(|(stat, value)| value.map(|v| (stat.to_owned(), v)))
        .collect();

    Ok(axum::response::Json(common::player::PlayerProfile {
        summary: summary(&player),
        steam_id: player.steam_id,
        stats,
        badges: badges.into_iter().map(badge).collect(),
    }))
}

#[tracing::instrument(skip(state))]
async fn badges(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<axum::response::Json<Vec<common::player::PlayerBadge>>, axum::http::StatusCode> {
    let mut conn = state.connection().await?;

    let player = find_player(&mut conn, &name).await?;
    let badges = crate::queries::get_badges_for_player(&mut conn, player.id)
        .await
        .map_err(super::internal_error)?;

    Ok(axum::response::Json(badges.into_iter().map(badge).collect()))
}

#[tracing::instrument(skip(state))]
async fn heatmaps(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<axum::response::Json<Vec<common::player::PlayerHeatmap>>, axum::http::StatusCode> {
    let mut conn = state.connection().await?;

    let player = find_player(&mut conn, &name).await?;
    let rows = crate::queries::get_heatmaps_for_player(&mut conn, player.id)
        .await
        .map_err(super::internal_error)?;

    let mut heatmaps = Vec::with_capacity(rows.len());
    for row in rows {
        let data = match tokio::fs::read(&row.image_path).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Reading heatmap {:?}: {:?}", row.image_path, e);
                continue;
            }
        };

        heatmaps.push(common::player::PlayerHeatmap {
            map: row.map_name,
            png_data: base64::prelude::BASE64_STANDARD.encode(data),
        });
    }

    Ok(axum::response::Json(heatmaps))
}
