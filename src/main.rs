use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use campus_desk::{
    config::{AppConfig, JwtConfig},
    models::Identity,
    routes,
    services::{seed, CommentStore, ReportStore, SharedClock, SystemClock, Workflow},
    utils::jwt::encode_access_token,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Auth routes
        campus_desk::handlers::auth::get_current_user,
        // Report routes
        campus_desk::handlers::report::create_report,
        campus_desk::handlers::report::list_my_reports,
        campus_desk::handlers::report::get_report,
        // Comment routes
        campus_desk::handlers::comment::list_comments,
        campus_desk::handlers::comment::create_comment,
        // Admin routes
        campus_desk::handlers::admin::list_reports,
        campus_desk::handlers::admin::update_status,
        campus_desk::handlers::admin::assign_report,
        campus_desk::handlers::admin::assign_to_me,
        campus_desk::handlers::admin::get_stats,
        campus_desk::handlers::admin::get_dashboard,
        campus_desk::handlers::admin::get_analytics,
    ),
    components(
        schemas(
            campus_desk::response::ApiResponse<serde_json::Value>,
            campus_desk::response::PaginatedResponse<serde_json::Value>,
            campus_desk::response::PaginationQuery,
            campus_desk::error::AppError,
            // Models
            campus_desk::models::Report,
            campus_desk::models::ReportStatus,
            campus_desk::models::ReportCategory,
            campus_desk::models::ReportPriority,
            campus_desk::models::Attachment,
            campus_desk::models::UserRole,
            campus_desk::services::Bucket,
            // Auth
            campus_desk::handlers::auth::MeResponse,
            // Report
            campus_desk::handlers::report::CreateReportRequest,
            campus_desk::handlers::report::MyReportsResponse,
            campus_desk::handlers::report::ReportDetailResponse,
            // Comment
            campus_desk::handlers::comment::CreateCommentRequest,
            campus_desk::handlers::comment::CommentResponse,
            // Admin
            campus_desk::handlers::admin::AdminReportsResponse,
            campus_desk::handlers::admin::UpdateStatusRequest,
            campus_desk::handlers::admin::AssignRequest,
            campus_desk::handlers::admin::WorkflowResponse,
            campus_desk::handlers::admin::StatsResponse,
            campus_desk::handlers::admin::DashboardResponse,
            campus_desk::services::stats::AnalyticsReport,
            campus_desk::services::stats::StudentSummary,
            campus_desk::services::query::BucketCounts,
        )
    ),
    modifiers(&JwtSecurity),
    tags(
        (name = "auth", description = "Identity of the caller"),
        (name = "reports", description = "Student report operations"),
        (name = "comments", description = "Report discussion threads"),
        (name = "admin", description = "Staff triage and statistics"),
    )
)]
struct ApiDoc;

struct JwtSecurity;

impl Modify for JwtSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // LOG_FORMAT=json for log shippers, human readable otherwise
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_desk=debug,tower_http=debug,axum=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // Validate configuration before doing anything else
    let app_config = AppConfig::from_env()?;
    let jwt_config = Arc::new(JwtConfig::from_env()?);

    tracing::info!(
        "Starting Campus Desk v{} (transitions: {:?})...",
        env!("CARGO_PKG_VERSION"),
        app_config.transitions
    );

    let workflow = build_workflow(&app_config, &jwt_config)?;

    let app = create_app(&app_config)
        .layer(Extension(workflow))
        .layer(Extension(jwt_config));

    let addr = app_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Stores start empty unless demo data is requested.
fn build_workflow(config: &AppConfig, jwt: &JwtConfig) -> anyhow::Result<Workflow> {
    let clock: SharedClock = Arc::new(SystemClock);

    if !config.seed_demo_data {
        let reports = ReportStore::new(clock, config.transitions);
        let comments = CommentStore::new(reports.clone());
        return Ok(Workflow::new(reports, comments));
    }

    let reports = ReportStore::with_reports(seed::demo_reports(), clock, config.transitions);
    let comments = CommentStore::with_threads(reports.clone(), seed::demo_comments());
    tracing::info!("Seeded {} demo reports", seed::demo_reports().len());

    // Dev tokens so the demo can be driven without an identity provider.
    for user in seed::demo_users() {
        let token = encode_access_token(jwt, &Identity::from(&user))?;
        tracing::info!(user = %user.email, role = %user.role, "demo token: {}", token);
    }

    Ok(Workflow::new(reports, comments))
}

fn build_cors_layer(origins_str: &str) -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins_str.trim() == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app(config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(routes::create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_origins))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check(Extension(workflow): Extension<Workflow>) -> impl IntoResponse {
    let reports = workflow.reports().all().await.len();

    Json(json!({
        "status": "ok",
        "service": "Campus Desk",
        "version": env!("CARGO_PKG_VERSION"),
        "reports": reports,
        "transitions": format!("{:?}", workflow.reports().policy()),
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
