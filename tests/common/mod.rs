#![allow(dead_code)]

use campus_desk::config::JwtConfig;
use campus_desk::models::{Identity, UserRole};
use campus_desk::services::{
    CommentStore, ManualClock, ReportStore, SharedClock, TransitionPolicy, Workflow,
};
use campus_desk::utils::jwt::encode_access_token;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;

const TEST_SECRET: &str = "integration_test_secret_that_is_at_least_32_characters_long";

pub struct TestApp {
    pub addr: String,
    pub client: Client,
    pub clock: ManualClock,
    pub jwt: Arc<JwtConfig>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.addr, path)
    }

    pub fn token(&self, id: &str, name: &str, role: UserRole) -> String {
        let identity = Identity {
            id: id.to_string(),
            name: name.to_string(),
            role,
        };
        encode_access_token(&self.jwt, &identity).expect("Failed to mint token")
    }

    pub fn student_token(&self) -> String {
        self.token("1", "John Student", UserRole::Student)
    }

    pub fn admin_token(&self) -> String {
        self.token("2", "Admin User", UserRole::Admin)
    }

    pub fn superadmin_token(&self) -> String {
        self.token("3", "Super Admin", UserRole::Superadmin)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TransitionPolicy::Open).await
}

pub async fn spawn_app_with(policy: TransitionPolicy) -> TestApp {
    let clock = ManualClock::new(
        Utc.with_ymd_and_hms(2024, 11, 20, 9, 0, 0)
            .single()
            .expect("valid start time"),
    );
    let shared: SharedClock = Arc::new(clock.clone());
    let reports = ReportStore::new(shared, policy);
    let comments = CommentStore::new(reports.clone());
    let workflow = Workflow::new(reports, comments);

    let jwt = Arc::new(JwtConfig::new(TEST_SECRET, 3600).expect("Invalid test JWT config"));

    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(campus_desk::routes::create_routes())
        .layer(axum::extract::Extension(workflow))
        .layer(axum::extract::Extension(jwt.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        client: Client::new(),
        clock,
        jwt,
    }
}

/// Submit a report and return its JSON.
pub async fn create_test_report(app: &TestApp, token: &str, title: &str, category: &str) -> Value {
    create_report_with(
        app,
        token,
        serde_json::json!({
            "title": title,
            "description": format!("{} needs attention", title),
            "category": category,
            "location": "Block A, Room 201",
        }),
    )
    .await
}

pub async fn create_report_with(app: &TestApp, token: &str, payload: Value) -> Value {
    let resp = app
        .client
        .post(app.url("/reports"))
        .bearer_auth(token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to create report");

    let status = resp.status();
    let body: Value = resp.json().await.expect("Failed to parse response");
    if !body["success"].as_bool().unwrap_or(false) {
        panic!("Failed to create report: status={}, body={}", status, body);
    }
    body["data"].clone()
}

pub async fn set_status(app: &TestApp, token: &str, id: u64, status: &str) -> reqwest::Response {
    app.client
        .put(app.url(&format!("/admin/reports/{}/status", id)))
        .bearer_auth(token)
        .json(&serde_json::json!({ "status": status }))
        .send()
        .await
        .expect("Failed to update status")
}
