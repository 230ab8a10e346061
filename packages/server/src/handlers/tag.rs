use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{resource_tag, tag};
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::shared::MessageResponse;
use crate::models::tag::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Tags",
    operation_id = "listTags",
    summary = "List the tag vocabulary",
    description = "Returns every known tag name in ascending order, including tags no resource uses any more.",
    responses(
        (status = 200, description = "All tags", body = Vec<TagResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = tag::Entity::find()
        .order_by_asc(tag::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "Tags",
    operation_id = "deleteTag",
    summary = "Delete a tag",
    description = "Removes the tag from the vocabulary and unlinks it from every resource.",
    request_body = DeleteTagRequest,
    responses(
        (status = 200, description = "Tag deleted", body = MessageResponse),
        (status = 400, description = "No such tag (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tag_name = %payload.tag_name))]
pub async fn delete_tag(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DeleteTagRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let name = payload.tag_name.trim();
    let txn = state.db.begin().await?;

    let unlinked = resource_tag::Entity::delete_many()
        .filter(resource_tag::Column::TagName.eq(name))
        .exec(&txn)
        .await?;
    let result = tag::Entity::delete_by_id(name.to_string()).exec(&txn).await?;
    if result.rows_affected != 1 {
        return Err(AppError::RowCountMismatch(
            "Did not delete exactly one tag".into(),
        ));
    }
    txn.commit().await?;

    info!(unlinked = unlinked.rows_affected, "Tag deleted");
    Ok(Json(MessageResponse::success(format!("Deleted tag {name}"))))
}
