use axum::extract::{Query, State};

use super::ApiState;

#[derive(Debug, serde::Deserialize)]
struct RecentQuery {
    limit: Option<i64>,
}

pub fn router() -> axum::Router<ApiState> {
    axum::Router::new().route("/recent", axum::routing::get(recent))
}

#[tracing::instrument(skip(state))]
async fn recent(
    State(state): State<ApiState>,
    Query(query): Query<RecentQuery>,
) -> Result<axum::response::Json<Vec<common::ProcessedDemo>>, axum::http::StatusCode> {
    let mut conn = state.connection().await?;

    let demos = crate::queries::get_recent_processed_demos(&mut conn, super::clamp_limit(query.limit))
        .await
        .map_err(super::internal_error)?;

    Ok(axum::response::Json(
        demos
            .into_iter()
            .map(|demo| common::ProcessedDemo {
                id: demo.id,
                file_path: demo.file_path,
                processed_at: demo.processed_at,
            })
            .collect(),
    ))
}
