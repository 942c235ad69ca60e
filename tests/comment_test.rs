mod common;

use chrono::Duration;
use serde_json::{json, Value};

async fn post_comment(app: &common::TestApp, token: &str, id: u64, content: &str) -> reqwest::Response {
    app.client
        .post(app.url(&format!("/reports/{}/comments", id)))
        .bearer_auth(token)
        .json(&json!({ "content": content }))
        .send()
        .await
        .unwrap()
}

async fn get_report(app: &common::TestApp, id: u64) -> Value {
    let resp = app
        .client
        .get(app.url(&format!("/reports/{}", id)))
        .bearer_auth(app.student_token())
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    body["data"].clone()
}

#[tokio::test]
async fn comments_keep_order_and_touch_report() {
    let app = common::spawn_app().await;
    let student = app.student_token();
    let admin = app.admin_token();
    let report = common::create_test_report(&app, &student, "Leaking tap", "Hostel").await;
    let id = report["id"].as_u64().unwrap();

    app.clock.advance(Duration::minutes(5));
    let resp = post_comment(&app, &admin, id, "A plumber is on the way").await;
    assert_eq!(resp.status(), 200);
    let first: Value = resp.json().await.unwrap();
    assert_eq!(first["message"], "Comment added");

    app.clock.advance(Duration::minutes(5));
    let resp = post_comment(&app, &student, id, "  Thank you!  ").await;
    let second: Value = resp.json().await.unwrap();
    assert_eq!(second["data"]["content"], "Thank you!");

    let resp = app
        .client
        .get(app.url(&format!("/reports/{}/comments", id)))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "A plumber is on the way");
    assert_eq!(comments[0]["author_role"], "admin");
    assert_eq!(comments[0]["author_is_staff"], true);
    assert_eq!(comments[1]["content"], "Thank you!");
    assert_eq!(comments[1]["author_is_staff"], false);
    assert!(comments[0]["created_at"].as_str() < comments[1]["created_at"].as_str());

    let detail = get_report(&app, id).await;
    assert_eq!(detail["report"]["updated_at"], comments[1]["created_at"]);
    assert_eq!(detail["report"]["status"], "new");
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let app = common::spawn_app().await;
    let token = app.student_token();
    let report = common::create_test_report(&app, &token, "Broken chair", "Library").await;
    let id = report["id"].as_u64().unwrap();

    app.clock.advance(Duration::minutes(1));
    let resp = post_comment(&app, &token, id, "   ").await;
    assert_eq!(resp.status(), 400);

    let detail = get_report(&app, id).await;
    assert!(detail["comments"].as_array().unwrap().is_empty());
    assert_eq!(detail["report"]["updated_at"], report["updated_at"]);
}

#[tokio::test]
async fn comment_on_unknown_report_is_not_found() {
    let app = common::spawn_app().await;
    let token = app.student_token();

    let resp = post_comment(&app, &token, 42, "Hello?").await;
    assert_eq!(resp.status(), 404);

    // Nothing was stored under the unknown id.
    let resp = app
        .client
        .get(app.url("/reports/42/comments"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn comments_require_token() {
    let app = common::spawn_app().await;
    let report = common::create_test_report(&app, &app.student_token(), "WiFi", "IT").await;

    let resp = app
        .client
        .post(app.url(&format!("/reports/{}/comments", report["id"])))
        .json(&json!({ "content": "anonymous" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
