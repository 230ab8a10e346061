use serde::{Deserialize, Serialize};

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    pub tag_name: String,
}

impl From<crate::entity::tag::Model> for TagResponse {
    fn from(m: crate::entity::tag::Model) -> Self {
        Self { tag_name: m.name }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeleteTagRequest {
    pub tag_name: String,
}
