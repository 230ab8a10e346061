use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

/// Body of the study-list add and remove endpoints.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct StudyListRequest {
    pub resource_id: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudyListEntryResponse {
    pub user_id: i32,
    pub resource_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::study_list_entry::Model> for StudyListEntryResponse {
    fn from(m: crate::entity::study_list_entry::Model) -> Self {
        Self {
            user_id: m.user_id,
            resource_id: m.resource_id,
            created_at: m.created_at,
        }
    }
}
