use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Confirmation returned by delete endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "success")]
    pub status: &'static str,
    #[schema(example = "Deleted resource 12")]
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Whether a user likes or dislikes something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LikeOrDislike {
    Like,
    Dislike,
}

impl LikeOrDislike {
    /// Value stored in the `liked` column.
    pub fn liked(self) -> bool {
        matches!(self, LikeOrDislike::Like)
    }
}

/// Body of the like-removal endpoints.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RemoveLikeRequest {
    pub user_id: i32,
}

/// Trim `value` and check it is 1..=`max` Unicode characters.
pub fn required_text(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(value.to_string())
}

/// Trim `value` and check it is at most `max` Unicode characters. Empty is allowed.
pub fn optional_text(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}
