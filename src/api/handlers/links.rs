//! Handlers for link creation and update.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::application::services::CreateLink;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /create`
///
/// # Request Body
///
/// ```json
/// {
///   "token": "promo-2026",        // optional, policy decides when absent
///   "redirect_link": "https://example.com/campaign",
///   "expiration_time": 45,        // whole minutes
///   "max_uniques_clicks": 3       // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 409 Conflict if the token is taken and 400 Bad Request on
/// validation failure (including a missing token when the service is
/// configured to require one).
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .links
        .create_link(CreateLink {
            token: payload.token,
            redirect_link: payload.redirect_link,
            expiration_minutes: payload.expiration_time,
            max_unique_clicks: payload.max_uniques_clicks,
        })
        .await?;

    Ok(Json(link.into()))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PUT /{link_id}`
///
/// # Request Body
///
/// All fields optional; only provided fields change. `null` clears the
/// clearable limits:
///
/// ```json
/// {
///   "redirect_link": "https://example.com/moved",
///   "token": "new-token",
///   "expiration_time": null,
///   "max_uniques_clicks": 10,
///   "active": false
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found for an unknown id, 409 Conflict if the token
/// belongs to another link, and 400 Bad Request on validation failure.
pub async fn update_link_handler(
    Path(link_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state.links.update_link(link_id, payload.into_patch()).await?;

    Ok(Json(link.into()))
}
