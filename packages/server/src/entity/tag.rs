use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A tag is identified by its name alone; there is no surrogate key.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,

    #[sea_orm(has_many)]
    pub resources: HasMany<super::resource_tag::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
