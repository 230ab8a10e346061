pub mod comment;
pub mod like;
pub mod resource;
pub mod shared;
pub mod tag;
pub mod user;
