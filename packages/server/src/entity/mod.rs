pub mod comment;
pub mod comment_like;
pub mod resource;
pub mod resource_like;
pub mod resource_tag;
pub mod study_list_entry;
pub mod tag;
pub mod user;
