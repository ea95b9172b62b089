//! DTO for the link update endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::LinkPatch;

/// Request body for `PUT /{link_id}`.
///
/// All fields are optional. Only provided fields are changed, and a
/// provided field fully replaces the stored value.
///
/// # Absent vs `null`
///
/// For the clearable limits the two are distinct:
///
/// - field not in the JSON → leave the stored value unchanged
/// - `"expiration_time": null` → the link never expires by time
/// - `"max_uniques_clicks": null` → unlimited unique visitors
///
/// `active` and `redirect_link` cannot be cleared, only replaced, so for
/// them `null` and absent both mean "no change".
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New redirect target for this link.
    #[validate(url(message = "Invalid URL format"))]
    pub redirect_link: Option<String>,

    /// New token. Must not belong to a different link.
    pub token: Option<String>,

    /// Expiration in whole minutes. Absent = no change, null = clear,
    /// value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expiration_time: Option<Option<i64>>,

    /// Unique click cap. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub max_uniques_clicks: Option<Option<i64>>,

    /// Activates or deactivates the link. Deactivated links never resolve.
    pub active: Option<bool>,
}

impl UpdateLinkRequest {
    pub fn into_patch(self) -> LinkPatch {
        LinkPatch {
            redirect_link: self.redirect_link,
            token: self.token,
            expiration_minutes: self.expiration_time,
            max_unique_clicks: self.max_uniques_clicks,
            active: self.active,
        }
    }
}
