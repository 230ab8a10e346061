use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use super::shared::{optional_text, required_text};
use crate::error::AppError;
use crate::utils::tags::normalize_tag_names;

pub const MAX_NAME_LENGTH: usize = 256;
pub const MAX_URL_LENGTH: usize = 2048;
pub const MAX_LONG_TEXT_LENGTH: usize = 10_000;

/// A submitted tag, either a bare name or `{"tag_name": "..."}`.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TagInput {
    Name(String),
    Object { tag_name: String },
}

impl TagInput {
    pub fn name(&self) -> &str {
        match self {
            TagInput::Name(name) | TagInput::Object { tag_name: name } => name,
        }
    }
}

/// Body of `POST /resources` and `PUT /resources/{id}`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ResourceSubmission {
    pub resource_name: String,
    pub author_name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub content_type: String,
    /// 1 to 5.
    #[schema(example = 4)]
    pub rating: i32,
    #[serde(default)]
    pub notes: String,
    pub user_id: i32,
    #[serde(default)]
    pub tag_array: Vec<TagInput>,
}

/// A submission after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidResource {
    pub resource_name: String,
    pub author_name: String,
    pub url: String,
    pub description: String,
    pub content_type: String,
    pub rating: i32,
    pub notes: String,
    pub user_id: i32,
    /// Trimmed, de-duplicated tag names in submission order.
    pub tags: Vec<String>,
}

pub fn validate_resource_submission(req: ResourceSubmission) -> Result<ValidResource, AppError> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation("rating must be 1-5".into()));
    }
    let tags = normalize_tag_names(req.tag_array.iter().map(TagInput::name))
        .map_err(|e| AppError::Validation(e.message()))?;

    Ok(ValidResource {
        resource_name: required_text("resource_name", &req.resource_name, MAX_NAME_LENGTH)?,
        author_name: required_text("author_name", &req.author_name, MAX_NAME_LENGTH)?,
        url: required_text("url", &req.url, MAX_URL_LENGTH)?,
        description: optional_text("description", &req.description, MAX_LONG_TEXT_LENGTH)?,
        content_type: required_text("content_type", &req.content_type, MAX_NAME_LENGTH)?,
        rating: req.rating,
        notes: optional_text("notes", &req.notes, MAX_LONG_TEXT_LENGTH)?,
        user_id: req.user_id,
        tags,
    })
}

/// A stored resource together with the tags it was saved with.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ResourceResponse {
    pub id: i32,
    pub resource_name: String,
    pub author_name: String,
    pub url: String,
    pub description: String,
    pub content_type: String,
    pub rating: i32,
    pub notes: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub tag_array: Vec<String>,
}

impl ResourceResponse {
    pub fn new(m: crate::entity::resource::Model, tag_array: Vec<String>) -> Self {
        Self {
            id: m.id,
            resource_name: m.resource_name,
            author_name: m.author_name,
            url: m.url,
            description: m.description,
            content_type: m.content_type,
            rating: m.rating,
            notes: m.notes,
            user_id: m.user_id,
            created_at: m.created_at,
            tag_array,
        }
    }
}

/// A resource joined with its owner's name, tags and like aggregates.
#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ResourceView {
    pub id: i32,
    pub resource_name: String,
    pub author_name: String,
    pub url: String,
    pub description: String,
    pub content_type: String,
    pub rating: i32,
    pub notes: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    /// Display name of the owning user.
    pub user_name: String,
    /// Distinct tag names, sorted. Empty when untagged.
    pub tag_array: Vec<String>,
    pub num_likes: i64,
    pub num_dislikes: i64,
    pub liking_users_array: Vec<i32>,
    pub disliking_users_array: Vec<i32>,
}

/// Aggregate view over all resources.
///
/// Tags and likes are aggregated per resource in subqueries before joining,
/// so a resource with several tags and likes still yields exactly one row.
pub(crate) const RESOURCE_VIEW_SQL: &str = r#"
SELECT r.id, r.resource_name, r.author_name, r.url, r.description,
       r.content_type, r.rating, r.notes, r.user_id, r.created_at,
       u.name AS user_name,
       COALESCE(t.tag_array, ARRAY[]::text[]) AS tag_array,
       COALESCE(l.num_likes, 0) AS num_likes,
       COALESCE(l.num_dislikes, 0) AS num_dislikes,
       COALESCE(l.liking_users_array, ARRAY[]::integer[]) AS liking_users_array,
       COALESCE(l.disliking_users_array, ARRAY[]::integer[]) AS disliking_users_array
FROM resource r
JOIN "user" u ON u.id = r.user_id
LEFT JOIN (
    SELECT resource_id, array_agg(DISTINCT tag_name::text ORDER BY tag_name::text) AS tag_array
    FROM resource_tag
    GROUP BY resource_id
) t ON t.resource_id = r.id
LEFT JOIN (
    SELECT resource_id,
           count(*) FILTER (WHERE liked) AS num_likes,
           count(*) FILTER (WHERE NOT liked) AS num_dislikes,
           array_agg(user_id ORDER BY user_id) FILTER (WHERE liked) AS liking_users_array,
           array_agg(user_id ORDER BY user_id) FILTER (WHERE NOT liked) AS disliking_users_array
    FROM resource_like
    GROUP BY resource_id
) l ON l.resource_id = r.id
"#;
