use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{comment, like, resource, tag, user};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/resources", resource_routes())
        .nest("/tags", tag_routes())
        .nest("/users", user_routes())
}

fn resource_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(resource::list_resources, resource::create_resource))
        .routes(routes!(
            resource::get_resource,
            resource::update_resource,
            resource::delete_resource
        ))
        .routes(routes!(comment::list_comments, comment::create_comment))
        .routes(routes!(like::like_resource, like::unlike_resource))
        .routes(routes!(comment::update_comment, comment::delete_comment))
        .routes(routes!(
            like::get_comment_likes,
            like::like_comment,
            like::unlike_comment
        ))
}

fn tag_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(tag::list_tags, tag::delete_tag))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(user::list_users))
        .routes(routes!(
            user::get_study_list,
            user::add_to_study_list,
            user::remove_from_study_list
        ))
}
