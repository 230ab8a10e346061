use axum::Json;
use axum::extract::State;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::{info, instrument};

use super::comment::find_comment;
use super::resource::{ensure_user_exists, find_resource};
use crate::entity::{comment_like, resource_like};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::like::*;
use crate::models::shared::{MessageResponse, RemoveLikeRequest};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{id}/likes",
    tag = "Likes",
    operation_id = "likeResource",
    summary = "Like or dislike a resource",
    description = "Records the user's vote on the resource. A second vote by the same user replaces the first.",
    params(("id" = i32, Path, description = "Resource ID")),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "Vote recorded", body = ResourceLikeResponse),
        (status = 400, description = "Validation error or unknown user (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Resource not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn like_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<LikeRequest>,
) -> Result<Json<ResourceLikeResponse>, AppError> {
    find_resource(&state.db, id).await?;
    ensure_user_exists(&state.db, payload.user_id).await?;

    let liked = payload.like_or_dislike.liked();
    resource_like::Entity::insert(resource_like::ActiveModel {
        resource_id: Set(id),
        user_id: Set(payload.user_id),
        liked: Set(liked),
    })
    .on_conflict(
        OnConflict::columns([resource_like::Column::ResourceId, resource_like::Column::UserId])
            .update_column(resource_like::Column::Liked)
            .to_owned(),
    )
    .exec_without_returning(&state.db)
    .await?;

    info!(resource_id = id, user_id = payload.user_id, liked, "Resource vote recorded");
    Ok(Json(ResourceLikeResponse {
        resource_id: id,
        user_id: payload.user_id,
        liked,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}/likes",
    tag = "Likes",
    operation_id = "unlikeResource",
    summary = "Remove a vote on a resource",
    params(("id" = i32, Path, description = "Resource ID")),
    request_body = RemoveLikeRequest,
    responses(
        (status = 200, description = "Vote removed", body = MessageResponse),
        (status = 400, description = "The user has no vote on this resource (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn unlike_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<RemoveLikeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = resource_like::Entity::delete_many()
        .filter(resource_like::Column::ResourceId.eq(id))
        .filter(resource_like::Column::UserId.eq(payload.user_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::RowCountMismatch(
            "Did not delete exactly one like".into(),
        ));
    }

    Ok(Json(MessageResponse::success(format!(
        "Removed vote of user {} on resource {id}",
        payload.user_id
    ))))
}

#[utoipa::path(
    get,
    path = "/comments/{id}/likes",
    tag = "Likes",
    operation_id = "getCommentLikes",
    summary = "Count votes on a comment",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Like and dislike counts", body = CommentLikeSummary),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_comment_likes(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CommentLikeSummary>, AppError> {
    find_comment(&state.db, id).await?;

    let counts: Vec<(bool, i64)> = comment_like::Entity::find()
        .filter(comment_like::Column::CommentId.eq(id))
        .select_only()
        .column(comment_like::Column::Liked)
        .column_as(comment_like::Column::UserId.count(), "num_votes")
        .group_by(comment_like::Column::Liked)
        .into_tuple()
        .all(&state.db)
        .await?;

    Ok(Json(CommentLikeSummary::from_counts(id, &counts)))
}

#[utoipa::path(
    post,
    path = "/comments/{id}/likes",
    tag = "Likes",
    operation_id = "likeComment",
    summary = "Like or dislike a comment",
    description = "Records the user's vote on the comment. A second vote by the same user replaces the first.",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "Vote recorded", body = CommentLikeResponse),
        (status = 400, description = "Validation error or unknown user (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn like_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<LikeRequest>,
) -> Result<Json<CommentLikeResponse>, AppError> {
    find_comment(&state.db, id).await?;
    ensure_user_exists(&state.db, payload.user_id).await?;

    let liked = payload.like_or_dislike.liked();
    comment_like::Entity::insert(comment_like::ActiveModel {
        comment_id: Set(id),
        user_id: Set(payload.user_id),
        liked: Set(liked),
    })
    .on_conflict(
        OnConflict::columns([comment_like::Column::CommentId, comment_like::Column::UserId])
            .update_column(comment_like::Column::Liked)
            .to_owned(),
    )
    .exec_without_returning(&state.db)
    .await?;

    Ok(Json(CommentLikeResponse {
        comment_id: id,
        user_id: payload.user_id,
        liked,
    }))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}/likes",
    tag = "Likes",
    operation_id = "unlikeComment",
    summary = "Remove a vote on a comment",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = RemoveLikeRequest,
    responses(
        (status = 200, description = "Vote removed", body = MessageResponse),
        (status = 400, description = "The user has no vote on this comment (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn unlike_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<RemoveLikeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = comment_like::Entity::delete_many()
        .filter(comment_like::Column::CommentId.eq(id))
        .filter(comment_like::Column::UserId.eq(payload.user_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::RowCountMismatch(
            "Did not delete exactly one like".into(),
        ));
    }

    Ok(Json(MessageResponse::success(format!(
        "Removed vote of user {} on comment {id}",
        payload.user_id
    ))))
}
