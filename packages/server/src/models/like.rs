use serde::{Deserialize, Serialize};

use super::shared::LikeOrDislike;

/// Body of the like/dislike upsert endpoints.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LikeRequest {
    pub user_id: i32,
    pub like_or_dislike: LikeOrDislike,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ResourceLikeResponse {
    pub resource_id: i32,
    pub user_id: i32,
    pub liked: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentLikeResponse {
    pub comment_id: i32,
    pub user_id: i32,
    pub liked: bool,
}

/// Like and dislike counts on a comment.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentLikeSummary {
    pub comment_id: i32,
    pub num_likes: i64,
    pub num_dislikes: i64,
}

impl CommentLikeSummary {
    /// Fold `(liked, count)` rows from a `GROUP BY liked` query.
    pub fn from_counts(comment_id: i32, counts: &[(bool, i64)]) -> Self {
        let mut summary = Self {
            comment_id,
            num_likes: 0,
            num_dislikes: 0,
        };
        for &(liked, count) in counts {
            if liked {
                summary.num_likes += count;
            } else {
                summary.num_dislikes += count;
            }
        }
        summary
    }
}
