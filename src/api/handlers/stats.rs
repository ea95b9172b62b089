//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click counts for a link.
///
/// # Endpoint
///
/// `GET /statistics/{link_id}`
///
/// # Response
///
/// ```json
/// { "unique_clicks": 2, "total_clicks": 5 }
/// ```
///
/// Counts are read fresh from storage; inactive and expired links still
/// report their accumulated clicks.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn stats_handler(
    Path(link_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats.stats(link_id).await?;

    Ok(Json(stats.into()))
}
