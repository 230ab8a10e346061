use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{study_list_entry, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::shared::MessageResponse;
use crate::models::user::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users",
    description = "Returns every user ordered by name.",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::Name)
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}/study_list",
    tag = "Users",
    operation_id = "getStudyList",
    summary = "Get a user's study list",
    description = "Returns the resources the user has saved, most recently added first.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Study list entries", body = Vec<StudyListEntryResponse>),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_study_list(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<StudyListEntryResponse>>, AppError> {
    user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let entries = study_list_entry::Entity::find()
        .filter(study_list_entry::Column::UserId.eq(id))
        .order_by_desc(study_list_entry::Column::CreatedAt)
        .order_by_desc(study_list_entry::Column::ResourceId)
        .all(&state.db)
        .await?;

    Ok(Json(
        entries.into_iter().map(StudyListEntryResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/{id}/study_list",
    tag = "Users",
    operation_id = "addToStudyList",
    summary = "Save a resource to a study list",
    params(("id" = i32, Path, description = "User ID")),
    request_body = StudyListRequest,
    responses(
        (status = 201, description = "Entry added", body = StudyListEntryResponse),
        (status = 400, description = "Unknown user or resource (CONSTRAINT_VIOLATION)", body = ErrorBody),
        (status = 409, description = "Already on the study list (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn add_to_study_list(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<StudyListRequest>,
) -> Result<impl IntoResponse, AppError> {
    let entry = study_list_entry::ActiveModel {
        user_id: Set(id),
        resource_id: Set(payload.resource_id),
        created_at: Set(chrono::Utc::now()),
    };

    match entry.insert(&state.db).await {
        Ok(model) => {
            info!(user_id = id, resource_id = model.resource_id, "Study list entry added");
            Ok((
                StatusCode::CREATED,
                Json(StudyListEntryResponse::from(model)),
            ))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(
            AppError::Conflict("Resource is already on the study list".into()),
        ),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/{id}/study_list",
    tag = "Users",
    operation_id = "removeFromStudyList",
    summary = "Remove a resource from a study list",
    params(("id" = i32, Path, description = "User ID")),
    request_body = StudyListRequest,
    responses(
        (status = 200, description = "Entry removed", body = MessageResponse),
        (status = 400, description = "Not on the study list (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn remove_from_study_list(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<StudyListRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = study_list_entry::Entity::delete_by_id((id, payload.resource_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::RowCountMismatch(
            "Did not delete exactly one study list entry".into(),
        ));
    }

    Ok(Json(MessageResponse::success(format!(
        "Removed resource {} from study list of user {id}",
        payload.resource_id
    ))))
}
