use serde_json::json;

use crate::common::{TestApp, routes};

mod comment_creation {
    use super::*;

    #[tokio::test]
    async fn creates_comment_with_author_name() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("owner").await;
        let reader = app.create_user("reader").await;
        let id = app.create_resource(owner, "Commented", &[]).await;

        let res = app
            .post(
                &routes::resource_comments(id),
                &json!({ "user_id": reader, "comment_body": "  Great read  " }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["comment_body"], "Great read");
        assert_eq!(res.body["user_name"], "reader");
        assert_eq!(res.body["resource_id"], id);
    }

    #[tokio::test]
    async fn rejects_empty_body() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("owner").await;
        let id = app.create_resource(owner, "Commented", &[]).await;

        let res = app
            .post(
                &routes::resource_comments(id),
                &json!({ "user_id": owner, "comment_body": "   " }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn comment_on_missing_resource_is_not_found() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;

        let res = app
            .post(
                &routes::resource_comments(4242),
                &json!({ "user_id": user_id, "comment_body": "Hello" }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn comment_by_unknown_user_is_rejected() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("owner").await;
        let id = app.create_resource(owner, "Commented", &[]).await;

        let res = app
            .post(
                &routes::resource_comments(id),
                &json!({ "user_id": 9999, "comment_body": "Hello" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod comment_listing {
    use super::*;

    #[tokio::test]
    async fn lists_newest_first() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_resource(user_id, "Discussed", &[]).await;
        let first = app.create_comment(id, user_id, "first").await;
        let second = app.create_comment(id, user_id, "second").await;

        let res = app.get(&routes::resource_comments(id)).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], second);
        assert_eq!(items[1]["id"], first);
        assert_eq!(items[0]["user_name"], "ada");
    }

    #[tokio::test]
    async fn only_lists_comments_of_that_resource() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let a = app.create_resource(user_id, "A", &[]).await;
        let b = app.create_resource(user_id, "B", &[]).await;
        app.create_comment(a, user_id, "on a").await;

        let res = app.get(&routes::resource_comments(b)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::resource_comments(4242)).await;

        assert_eq!(res.status, 404);
    }
}

mod comment_editing {
    use super::*;

    #[tokio::test]
    async fn updates_body() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_resource(user_id, "Discussed", &[]).await;
        let comment_id = app.create_comment(id, user_id, "tpyo").await;

        let res = app
            .put(&routes::comment(comment_id), &json!({ "comment_body": "typo" }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["comment_body"], "typo");
        assert_eq!(res.body["user_name"], "ada");
    }

    #[tokio::test]
    async fn update_missing_comment_is_a_row_count_mismatch() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::comment(4242), &json!({ "comment_body": "x" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ROW_COUNT_MISMATCH");
    }

    #[tokio::test]
    async fn delete_removes_comment_and_its_likes() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_resource(user_id, "Discussed", &[]).await;
        let comment_id = app.create_comment(id, user_id, "bye").await;
        app.post(
            &routes::comment_likes(comment_id),
            &json!({ "user_id": user_id, "like_or_dislike": "like" }),
        )
        .await;

        let res = app.delete(&routes::comment(comment_id)).await;
        assert_eq!(res.status, 200, "{}", res.text);

        let list = app.get(&routes::resource_comments(id)).await;
        assert_eq!(list.body, json!([]));
    }

    #[tokio::test]
    async fn delete_missing_comment_is_a_row_count_mismatch() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::comment(4242)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ROW_COUNT_MISMATCH");
    }
}
