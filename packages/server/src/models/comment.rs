use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::MAX_LONG_TEXT_LENGTH;
use super::shared::required_text;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    pub user_id: i32,
    pub comment_body: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCommentRequest {
    pub comment_body: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: i32,
    /// Display name of the author.
    pub user_name: String,
    pub comment_body: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(m: crate::entity::comment::Model, user_name: String) -> Self {
        Self {
            id: m.id,
            resource_id: m.resource_id,
            user_id: m.user_id,
            user_name,
            comment_body: m.comment_body,
            created_at: m.created_at,
        }
    }
}

pub fn validate_comment_body(body: &str) -> Result<String, AppError> {
    required_text("comment_body", body, MAX_LONG_TEXT_LENGTH)
}
