mod common;

use campus_desk::config::JwtConfig;
use campus_desk::models::{Identity, UserRole};
use campus_desk::utils::jwt::encode_access_token;
use serde_json::Value;

#[tokio::test]
async fn me_returns_identity_from_token() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], "2");
    assert_eq!(body["data"]["name"], "Admin User");
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["is_staff"], true);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let app = common::spawn_app().await;
    let foreign = JwtConfig::new("a_completely_different_secret_of_32_chars_min", 3600).unwrap();
    let token = encode_access_token(
        &foreign,
        &Identity {
            id: "3".into(),
            name: "Mallory".into(),
            role: UserRole::Superadmin,
        },
    )
    .unwrap();

    let resp = app
        .client
        .get(app.url("/admin/stats"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn health_check_is_public() {
    let app = common::spawn_app().await;
    let resp = app.client.get(&app.addr).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}
