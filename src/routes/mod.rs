use crate::handlers;
use crate::middleware::auth::auth_middleware;
use axum::{middleware, routing, Router};

/// API routes. Callers layer in `Extension<Workflow>` and
/// `Extension<Arc<JwtConfig>>`.
pub fn create_routes() -> Router {
    Router::new().nest("/api/v1", api_routes())
}

fn api_routes() -> Router {
    student_routes()
        .merge(admin_routes())
        .layer(middleware::from_fn(auth_middleware))
}

/// Any signed-in user.
fn student_routes() -> Router {
    Router::new()
        .route("/auth/me", routing::get(handlers::get_current_user))
        // Reports
        .route("/reports", routing::post(handlers::report::create_report))
        .route(
            "/reports/mine",
            routing::get(handlers::report::list_my_reports),
        )
        .route("/reports/{id}", routing::get(handlers::report::get_report))
        // Comments
        .route(
            "/reports/{id}/comments",
            routing::get(handlers::comment::list_comments)
                .post(handlers::comment::create_comment),
        )
}

/// Staff only (checked in handler).
fn admin_routes() -> Router {
    Router::new()
        .route(
            "/admin/reports",
            routing::get(handlers::admin::list_reports),
        )
        .route(
            "/admin/reports/{id}/status",
            routing::put(handlers::admin::update_status),
        )
        .route(
            "/admin/reports/{id}/assign",
            routing::put(handlers::admin::assign_report),
        )
        .route(
            "/admin/reports/{id}/assign-to-me",
            routing::post(handlers::admin::assign_to_me),
        )
        .route("/admin/stats", routing::get(handlers::admin::get_stats))
        .route(
            "/admin/dashboard",
            routing::get(handlers::admin::get_dashboard),
        )
        .route(
            "/admin/analytics",
            routing::get(handlers::admin::get_analytics),
        )
}
