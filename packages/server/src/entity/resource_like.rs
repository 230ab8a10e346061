use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One like (`liked = true`) or dislike per user and resource.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resource_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub resource_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "resource_id", to = "id")]
    pub resource: Option<super::resource::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: Option<super::user::Entity>,

    pub liked: bool,
}

impl ActiveModelBehavior for ActiveModel {}
