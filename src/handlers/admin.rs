use crate::error::{AppError, AppResult};
use crate::handlers::comment::CommentResponse;
use crate::middleware::auth::require_staff;
use crate::models::{
    report::not_blank, Identity, Report, ReportCategory, ReportId, ReportPriority, ReportStatus,
};
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::{
    query::{bucket_counts, recent_active, urgent, BucketCounts},
    stats::{analytics, compute_stats, AnalyticsReport, DashboardStats},
    Bucket, ReportFilter, SearchScope, Workflow,
};
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

const DASHBOARD_FEED_LEN: usize = 5;
const DASHBOARD_URGENT_LEN: usize = 3;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminReportsQuery {
    /// Tab: all, new, active or resolved
    #[serde(default)]
    pub bucket: Bucket,
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
    /// Matches title, description or reporter name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminReportsResponse {
    /// Tab counts over the whole store, ignoring filters
    pub counts: BucketCounts,
    pub reports: PaginatedResponse<Report>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: ReportStatus,
    /// Reject the change if the report has moved on since this version
    pub expected_version: Option<u64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRequest {
    #[validate(custom(function = "not_blank"))]
    pub assignee_id: String,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub assignee_name: String,
    pub expected_version: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VersionQuery {
    pub expected_version: Option<u64>,
}

/// A report together with the note the action left in its thread.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkflowResponse {
    pub report: Report,
    pub comment: CommentResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub resolution_rate_percent: u32,
    pub active_issues: u64,
}

impl From<DashboardStats> for StatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            resolution_rate_percent: stats.resolution_rate_percent(),
            active_issues: stats.active_issues(),
            stats,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: StatsResponse,
    /// Newest new or in-progress reports
    pub recent: Vec<Report>,
    /// First few open high priority reports
    pub urgent: Vec<Report>,
    pub urgent_total: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/reports",
    security(("jwt_token" = [])),
    params(
        ("bucket" = Option<Bucket>, Query, description = "all | new | active | resolved"),
        ("status" = Option<ReportStatus>, Query, description = "Filter by status"),
        ("category" = Option<ReportCategory>, Query, description = "Filter by category"),
        ("priority" = Option<ReportPriority>, Query, description = "Filter by priority"),
        ("search" = Option<String>, Query, description = "Search title, description, reporter"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Filtered reports, newest first", body = AdminReportsResponse),
        (status = 403, description = "Staff only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_reports(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Query(params): Query<AdminReportsQuery>,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;

    let filter = ReportFilter {
        bucket: params.bucket,
        status: params.status,
        category: params.category,
        priority: params.priority,
        search: params.search,
        search_scope: SearchScope::All,
    };
    let pagination = PaginationQuery {
        page: params.page,
        per_page: params.per_page,
    };

    let counts = bucket_counts(&workflow.reports().all().await);
    let matched = workflow.reports().query_filtered(&filter).await;

    Ok(ApiResponse::ok(AdminReportsResponse {
        counts,
        reports: PaginatedResponse::from_vec(matched, &pagination),
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/reports/{id}/status",
    security(("jwt_token" = [])),
    params(("id" = u64, Path, description = "Report ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = WorkflowResponse),
        (status = 403, description = "Staff only", body = AppError),
        (status = 404, description = "Report not found", body = AppError),
        (status = 409, description = "Stale version or disallowed transition", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_status(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Path(id): Path<ReportId>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;

    let (report, comment) = workflow
        .change_status(id, payload.status, &identity, payload.expected_version)
        .await?;

    Ok(ApiResponse::with_message(
        WorkflowResponse {
            report,
            comment: comment.into(),
        },
        format!("Report status changed to {}", payload.status.label()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/reports/{id}/assign",
    security(("jwt_token" = [])),
    params(("id" = u64, Path, description = "Report ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Assignee set", body = Report),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Staff only", body = AppError),
        (status = 404, description = "Report not found", body = AppError),
        (status = 409, description = "Stale version", body = AppError),
    ),
    tag = "admin"
)]
pub async fn assign_report(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Path(id): Path<ReportId>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;
    payload.validate()?;

    let report = workflow
        .reports()
        .assign(
            id,
            payload.assignee_id.trim(),
            payload.assignee_name.trim(),
            payload.expected_version,
        )
        .await?;

    Ok(ApiResponse::ok(report))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/reports/{id}/assign-to-me",
    security(("jwt_token" = [])),
    params(
        ("id" = u64, Path, description = "Report ID"),
        ("expected_version" = Option<u64>, Query, description = "Optimistic concurrency check"),
    ),
    responses(
        (status = 200, description = "Assigned to the caller", body = WorkflowResponse),
        (status = 403, description = "Staff only", body = AppError),
        (status = 404, description = "Report not found", body = AppError),
        (status = 409, description = "Stale version", body = AppError),
    ),
    tag = "admin"
)]
pub async fn assign_to_me(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Path(id): Path<ReportId>,
    Query(params): Query<VersionQuery>,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;

    let (report, comment) = workflow
        .assign_to_self(id, &identity, params.expected_version)
        .await?;

    Ok(ApiResponse::with_message(
        WorkflowResponse {
            report,
            comment: comment.into(),
        },
        "You are now assigned to this report",
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse),
        (status = 403, description = "Staff only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn get_stats(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;

    let reports = workflow.reports().all().await;
    Ok(ApiResponse::ok(StatsResponse::from(compute_stats(&reports))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Staff dashboard", body = DashboardResponse),
        (status = 403, description = "Staff only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn get_dashboard(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;

    let reports = workflow.reports().all().await;
    let mut urgent_reports = urgent(&reports);
    let urgent_total = urgent_reports.len() as u64;
    urgent_reports.truncate(DASHBOARD_URGENT_LEN);

    Ok(ApiResponse::ok(DashboardResponse {
        stats: compute_stats(&reports).into(),
        recent: recent_active(&reports, DASHBOARD_FEED_LEN),
        urgent: urgent_reports,
        urgent_total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/analytics",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Breakdowns and key metrics", body = AnalyticsReport),
        (status = 403, description = "Staff only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn get_analytics(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
) -> AppResult<impl IntoResponse> {
    require_staff(&identity)?;

    let reports = workflow.reports().all().await;
    Ok(ApiResponse::ok(analytics(&reports)))
}
