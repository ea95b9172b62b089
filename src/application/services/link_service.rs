//! Link creation and update service.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::config::TokenPolicy;
use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::locks::LinkLocks;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::token_generator::{generate_token, validate_custom_token};

/// Generation attempts before giving up on a collision-free random token.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Input for creating a new link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub token: Option<String>,
    pub redirect_link: String,
    pub expiration_minutes: i64,
    pub max_unique_clicks: Option<i64>,
}

/// Service owning link creation and partial updates.
///
/// Enforces token validity and uniqueness (fast pre-check here, the atomic
/// check in storage) and applies the configured policy for requests that
/// omit the token.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    locks: Arc<LinkLocks>,
    token_policy: TokenPolicy,
}

impl LinkService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        locks: Arc<LinkLocks>,
        token_policy: TokenPolicy,
    ) -> Self {
        Self {
            links,
            locks,
            token_policy,
        }
    }

    /// Creates a link, active from the start.
    ///
    /// A supplied token is validated and checked for uniqueness; an omitted
    /// token is either generated (with bounded collision retry) or rejected,
    /// per [`TokenPolicy`]. The storage insert re-checks uniqueness
    /// atomically, so two concurrent creates with the same token cannot both
    /// succeed; the pre-check only exists for a fast error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL or token (or a
    /// missing token under `TokenPolicy::Require`) and [`AppError::Conflict`]
    /// if the token is taken.
    pub async fn create_link(&self, request: CreateLink) -> Result<Link, AppError> {
        validate_redirect_link(&request.redirect_link)?;

        if request.expiration_minutes < 0 {
            return Err(AppError::bad_request(
                "Expiration must be zero or more minutes",
                json!({ "expiration_time": request.expiration_minutes }),
            ));
        }

        if let Some(cap) = request.max_unique_clicks {
            validate_click_cap(cap)?;
        }

        let token = match request.token {
            Some(token) => {
                validate_custom_token(&token)?;

                if self.links.find_by_token(&token).await?.is_some() {
                    return Err(AppError::conflict(
                        "Token already in use",
                        json!({ "token": token }),
                    ));
                }

                token
            }
            None => match self.token_policy {
                TokenPolicy::Generate => self.generate_unique_token().await?,
                TokenPolicy::Require => {
                    return Err(AppError::bad_request(
                        "Token is required",
                        json!({ "token": null }),
                    ));
                }
            },
        };

        let link = self
            .links
            .create(NewLink {
                token,
                redirect_link: request.redirect_link,
                expiration_minutes: Some(request.expiration_minutes),
                max_unique_clicks: request.max_unique_clicks,
            })
            .await?;

        tracing::info!(link_id = link.id, token = %link.token, "link created");

        Ok(link)
    }

    /// Partially updates a link; only fields present in `patch` change.
    ///
    /// Runs inside the link's critical section so a cap or `active` change
    /// cannot interleave with the click recorder's count-check-insert
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id,
    /// [`AppError::Conflict`] if the new token belongs to a different link,
    /// and [`AppError::Validation`] for invalid field values.
    pub async fn update_link(&self, link_id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        if let Some(redirect_link) = &patch.redirect_link {
            validate_redirect_link(redirect_link)?;
        }

        if let Some(Some(minutes)) = patch.expiration_minutes {
            if minutes < 0 {
                return Err(AppError::bad_request(
                    "Expiration must be zero or more minutes",
                    json!({ "expiration_time": minutes }),
                ));
            }
        }

        if let Some(Some(cap)) = patch.max_unique_clicks {
            validate_click_cap(cap)?;
        }

        // Unknown ids fail before any conflict checks.
        if self.links.find_by_id(link_id).await?.is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        if let Some(token) = &patch.token {
            validate_custom_token(token)?;

            if let Some(owner) = self.links.find_by_token(token).await? {
                if owner.id != link_id {
                    return Err(AppError::conflict(
                        "Token already in use",
                        json!({ "token": token }),
                    ));
                }
            }
        }

        let _guard = self.locks.acquire(link_id).await;

        let link = self.links.update(link_id, patch).await?;

        tracing::info!(link_id = link.id, token = %link.token, "link updated");

        Ok(link)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `link_id`.
    pub async fn get_link(&self, link_id: i64) -> Result<Link, AppError> {
        self.links.find_by_id(link_id).await?.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "link_id": link_id }))
        })
    }

    async fn generate_unique_token(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let token = generate_token();

            if self.links.find_by_token(&token).await?.is_none() {
                return Ok(token);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique token",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

fn validate_redirect_link(redirect_link: &str) -> Result<(), AppError> {
    Url::parse(redirect_link).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    Ok(())
}

fn validate_click_cap(cap: i64) -> Result<(), AppError> {
    if cap < 1 {
        return Err(AppError::bad_request(
            "Unique click limit must be positive",
            json!({ "max_uniques_clicks": cap }),
        ));
    }

    Ok(())
}
