use serde_json::json;

use crate::common::{TestApp, routes};

mod tag_vocabulary {
    use super::*;

    #[tokio::test]
    async fn lists_tags_sorted_by_name() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        app.create_resource(user_id, "R", &["zig", "go", "rust"])
            .await;

        let res = app.get(routes::TAGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!([{ "tag_name": "go" }, { "tag_name": "rust" }, { "tag_name": "zig" }])
        );
    }

    #[tokio::test]
    async fn tags_are_case_sensitive() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        app.create_resource(user_id, "R", &["Rust", "rust"]).await;

        let res = app.get(routes::TAGS).await;

        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_tag_unlinks_it_from_resources() {
        let app = TestApp::spawn().await;
        let user_id = app.create_user("ada").await;
        let id = app.create_resource(user_id, "R", &["rust", "go"]).await;

        let res = app
            .delete_with_body(routes::TAGS, &json!({ "tag_name": "rust" }))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let view = app.get(&routes::resource(id)).await;
        assert_eq!(view.body["tag_array"], json!(["go"]));
        let tags = app.get(routes::TAGS).await;
        assert_eq!(tags.body, json!([{ "tag_name": "go" }]));
    }

    #[tokio::test]
    async fn deleting_unknown_tag_is_a_row_count_mismatch() {
        let app = TestApp::spawn().await;

        let res = app
            .delete_with_body(routes::TAGS, &json!({ "tag_name": "nope" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ROW_COUNT_MISMATCH");
    }
}
