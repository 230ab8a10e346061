use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{comment, resource, resource_tag};

/// Ensure secondary indexes exist.
///
/// Schema sync creates tables, primary keys and foreign keys but not
/// non-unique indexes, so they are created here on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Listing order: ORDER BY created_at DESC, id DESC
    create_index(
        db,
        "idx_resource_created_id",
        Index::create()
            .table(resource::Entity)
            .col(resource::Column::CreatedAt)
            .col(resource::Column::Id)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        "idx_comment_resource",
        Index::create()
            .table(comment::Entity)
            .col(comment::Column::ResourceId)
            .to_owned(),
    )
    .await;

    // Tag deletion removes links by tag name
    create_index(
        db,
        "idx_resource_tag_tag_name",
        Index::create()
            .table(resource_tag::Entity)
            .col(resource_tag::Column::TagName)
            .to_owned(),
    )
    .await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, mut stmt: IndexCreateStatement) {
    let sql = stmt
        .if_not_exists()
        .name(name)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&sql).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
