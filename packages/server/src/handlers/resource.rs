use std::collections::HashSet;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::{LockType, OnConflict, Query as SeaQuery};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{
    comment, comment_like, resource, resource_like, resource_tag, study_list_entry, tag, user,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::resource::*;
use crate::models::shared::MessageResponse;
use crate::notifier::{self, ResourceCreated};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Resources",
    operation_id = "listResources",
    summary = "List all resources",
    description = "Returns every resource, newest first (ties broken by id, descending), with the owner's name, the resource's tags and like/dislike aggregates. Counts default to 0 and arrays to empty.",
    responses(
        (status = 200, description = "All resources", body = Vec<ResourceView>),
        (status = 503, description = "Database unavailable (SERVICE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_resources(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResourceView>>, AppError> {
    let stmt = Statement::from_string(
        DbBackend::Postgres,
        format!("{RESOURCE_VIEW_SQL} ORDER BY r.created_at DESC, r.id DESC"),
    );
    let rows = ResourceView::find_by_statement(stmt)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Resources",
    operation_id = "getResource",
    summary = "Get a resource by ID",
    description = "Returns one resource in the same enriched shape as the listing.",
    params(("id" = i32, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource details", body = ResourceView),
        (status = 404, description = "Resource not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ResourceView>, AppError> {
    let view = find_resource_view(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Resources",
    operation_id = "createResource",
    summary = "Submit a new resource",
    description = "Stores the resource, adds any unseen tag names to the tag vocabulary and links the submitted tags, all in one transaction. A webhook announcement is sent afterwards on a best-effort basis.",
    request_body = ResourceSubmission,
    responses(
        (status = 201, description = "Resource created", body = ResourceResponse),
        (status = 400, description = "Validation error or unknown user (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_resource(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ResourceSubmission>,
) -> Result<impl IntoResponse, AppError> {
    let valid = validate_resource_submission(payload)?;

    let txn = state.db.begin().await?;
    ensure_user_exists(&txn, valid.user_id).await?;

    let new_resource = resource::ActiveModel {
        resource_name: Set(valid.resource_name.clone()),
        author_name: Set(valid.author_name.clone()),
        url: Set(valid.url.clone()),
        description: Set(valid.description.clone()),
        content_type: Set(valid.content_type.clone()),
        rating: Set(valid.rating),
        notes: Set(valid.notes.clone()),
        user_id: Set(valid.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_resource.insert(&txn).await?;

    link_tags(&txn, model.id, &valid.tags).await?;
    txn.commit().await?;

    info!(resource_id = model.id, tags = valid.tags.len(), "Resource created");

    notifier::dispatch_resource_created(
        state.notifier.clone(),
        ResourceCreated {
            resource_id: model.id,
            resource_name: model.resource_name.clone(),
        },
    );

    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse::new(model, valid.tags)),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Resources",
    operation_id = "updateResource",
    summary = "Replace a resource",
    description = "Replaces every field of the resource and its tag set. Tags not in the submission are unlinked but stay in the vocabulary. Runs in one transaction.",
    params(("id" = i32, Path, description = "Resource ID")),
    request_body = ResourceSubmission,
    responses(
        (status = 201, description = "Resource updated", body = ResourceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR) or no such resource (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<ResourceSubmission>,
) -> Result<impl IntoResponse, AppError> {
    let valid = validate_resource_submission(payload)?;

    let txn = state.db.begin().await?;
    ensure_user_exists(&txn, valid.user_id).await?;
    let existing = resource::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::RowCountMismatch("Did not update exactly one resource".into()))?;

    let mut active: resource::ActiveModel = existing.into();
    active.resource_name = Set(valid.resource_name.clone());
    active.author_name = Set(valid.author_name.clone());
    active.url = Set(valid.url.clone());
    active.description = Set(valid.description.clone());
    active.content_type = Set(valid.content_type.clone());
    active.rating = Set(valid.rating);
    active.notes = Set(valid.notes.clone());
    active.user_id = Set(valid.user_id);
    let model = active.update(&txn).await?;

    // Full replace: the new tag set is exactly the submitted one.
    resource_tag::Entity::delete_many()
        .filter(resource_tag::Column::ResourceId.eq(id))
        .exec(&txn)
        .await?;
    link_tags(&txn, id, &valid.tags).await?;
    txn.commit().await?;

    info!(resource_id = id, tags = valid.tags.len(), "Resource updated");

    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse::new(model, valid.tags)),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Resources",
    operation_id = "deleteResource",
    summary = "Delete a resource by ID",
    description = "Deletes the resource with its tag links, likes, comments (and their likes) and study-list entries.",
    params(("id" = i32, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 400, description = "No such resource (ROW_COUNT_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let txn = state.db.begin().await?;

    resource_tag::Entity::delete_many()
        .filter(resource_tag::Column::ResourceId.eq(id))
        .exec(&txn)
        .await?;
    resource_like::Entity::delete_many()
        .filter(resource_like::Column::ResourceId.eq(id))
        .exec(&txn)
        .await?;
    comment_like::Entity::delete_many()
        .filter(
            comment_like::Column::CommentId.in_subquery(
                SeaQuery::select()
                    .column(comment::Column::Id)
                    .from(comment::Entity)
                    .and_where(comment::Column::ResourceId.eq(id))
                    .to_owned(),
            ),
        )
        .exec(&txn)
        .await?;
    comment::Entity::delete_many()
        .filter(comment::Column::ResourceId.eq(id))
        .exec(&txn)
        .await?;
    study_list_entry::Entity::delete_many()
        .filter(study_list_entry::Column::ResourceId.eq(id))
        .exec(&txn)
        .await?;

    let result = resource::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected != 1 {
        return Err(AppError::RowCountMismatch(
            "Did not delete exactly one resource".into(),
        ));
    }
    txn.commit().await?;

    info!(resource_id = id, "Resource deleted");
    Ok(Json(MessageResponse::success(format!("Deleted resource {id}"))))
}

pub(crate) async fn find_resource_view<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<ResourceView>, AppError> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        format!("{RESOURCE_VIEW_SQL} WHERE r.id = $1"),
        [id.into()],
    );
    Ok(ResourceView::find_by_statement(stmt).one(db).await?)
}

pub(crate) async fn find_resource<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<resource::Model, AppError> {
    resource::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))
}

/// The owner must exist before anything is written.
pub(crate) async fn ensure_user_exists<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Validation(format!("User {user_id} does not exist")))
}

/// Add unseen names to the tag vocabulary, then link every name to the resource.
///
/// Callers remove stale links first. Tag inserts ignore conflicts so that two
/// submissions introducing the same new name concurrently both succeed.
async fn link_tags<C: ConnectionTrait>(
    db: &C,
    resource_id: i32,
    tags: &[String],
) -> Result<(), AppError> {
    if tags.is_empty() {
        return Ok(());
    }

    let existing: HashSet<String> = tag::Entity::find()
        .filter(tag::Column::Name.is_in(tags.iter().cloned()))
        .select_only()
        .column(tag::Column::Name)
        .into_tuple::<String>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut created = 0u64;
    for name in crate::utils::tags::missing_tags(tags, &existing) {
        let result = tag::Entity::insert(tag::ActiveModel {
            name: Set(name.to_string()),
        })
        .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await;

        match result {
            Ok(rows) => created += rows,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }
    }
    if created > 0 {
        info!(resource_id, created, "Added new tags to vocabulary");
    }

    for name in tags {
        resource_tag::Entity::insert(resource_tag::ActiveModel {
            resource_id: Set(resource_id),
            tag_name: Set(name.clone()),
        })
        .exec_without_returning(db)
        .await?;
    }

    Ok(())
}
