use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use super::resource::{ensure_user_exists, find_resource};
use crate::entity::{comment, comment_like, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::comment::*;
use crate::models::shared::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{id}/comments",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List comments on a resource",
    description = "Returns the comments on a resource with their authors' names, newest first.",
    params(("id" = i32, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Comments on the resource", body = Vec<CommentResponse>),
        (status = 404, description = "Resource not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    find_resource(&state.db, id).await?;

    let rows = comment::Entity::find()
        .filter(comment::Column::ResourceId.eq(id))
        .find_also_related(user::Entity)
        .order_by_desc(comment::Column::CreatedAt)
        .order_by_desc(comment::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(c, usr)| CommentResponse::new(c, usr.map(|u| u.name).unwrap_or_default()))
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a resource",
    params(("id" = i32, Path, description = "Resource ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error or unknown user (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Resource not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let body = validate_comment_body(&payload.comment_body)?;
    find_resource(&state.db, id).await?;
    let author = ensure_user_exists(&state.db, payload.user_id).await?;

    let new_comment = comment::ActiveModel {
        comment_body: Set(body),
        resource_id: Set(id),
        user_id: Set(author.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_comment.insert(&state.db).await?;

    info!(comment_id = model.id, resource_id = id, "Comment created");
    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::new(model, author.name)),
    ))
}

#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "updateComment",
    summary = "Edit a comment",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR) or no such comment (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let body = validate_comment_body(&payload.comment_body)?;

    let (existing, author) = comment::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::RowCountMismatch("Did not update exactly one comment".into()))?;

    let mut active: comment::ActiveModel = existing.into();
    active.comment_body = Set(body);
    let model = active.update(&state.db).await?;

    Ok(Json(CommentResponse::new(
        model,
        author.map(|u| u.name).unwrap_or_default(),
    )))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment",
    description = "Deletes the comment together with its likes.",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 400, description = "No such comment (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let txn = state.db.begin().await?;

    comment_like::Entity::delete_many()
        .filter(comment_like::Column::CommentId.eq(id))
        .exec(&txn)
        .await?;
    let result = comment::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected != 1 {
        return Err(AppError::RowCountMismatch(
            "Did not delete exactly one comment".into(),
        ));
    }
    txn.commit().await?;

    info!(comment_id = id, "Comment deleted");
    Ok(Json(MessageResponse::success(format!("Deleted comment {id}"))))
}

pub(crate) async fn find_comment<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<comment::Model, AppError> {
    comment::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))
}
