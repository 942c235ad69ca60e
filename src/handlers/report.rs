use crate::error::{AppError, AppResult};
use crate::handlers::comment::CommentResponse;
use crate::models::{
    report::not_blank, Attachment, Identity, NewReport, Report, ReportCategory, ReportId,
    ReportPriority, ReportStatus,
};
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::{
    query::filter_reports,
    stats::{student_summary, StudentSummary},
    Bucket, ReportFilter, SearchScope, Workflow,
};
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    /// Short summary of the issue (1-200 characters)
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: String,
    /// What is wrong, since when, what was tried
    #[validate(length(max = 5000), custom(function = "not_blank"))]
    pub description: String,
    /// Required
    #[validate(required(message = "category is required"))]
    pub category: Option<ReportCategory>,
    /// Where on campus (1-200 characters)
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub location: String,
    /// Defaults to medium
    #[serde(default)]
    pub priority: ReportPriority,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl CreateReportRequest {
    /// Validate and turn into store input.
    pub fn into_new_report(self) -> AppResult<NewReport> {
        self.validate()?;
        let category = self
            .category
            .ok_or_else(|| AppError::Validation("category is required".to_string()))?;
        Ok(NewReport {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            location: self.location.trim().to_string(),
            priority: self.priority,
            attachments: self.attachments,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MyReportsQuery {
    /// Filter by status
    pub status: Option<ReportStatus>,
    /// Filter by category
    pub category: Option<ReportCategory>,
    /// Matches title or description
    pub search: Option<String>,
    /// Page number
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyReportsResponse {
    /// Counts over all of the caller's reports, ignoring filters
    pub summary: StudentSummary,
    pub reports: PaginatedResponse<Report>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportDetailResponse {
    pub report: Report,
    pub comments: Vec<CommentResponse>,
    /// Statuses staff may move this report to next
    pub next_statuses: Vec<ReportStatus>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reports",
    security(("jwt_token" = [])),
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report submitted", body = Report),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "reports"
)]
pub async fn create_report(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Json(payload): Json<CreateReportRequest>,
) -> AppResult<impl IntoResponse> {
    let input = payload.into_new_report()?;

    let report = workflow
        .reports()
        .create(&identity.id, &identity.name, input)
        .await;

    Ok(ApiResponse::with_message(report, "Report submitted"))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/mine",
    security(("jwt_token" = [])),
    params(
        ("status" = Option<ReportStatus>, Query, description = "Filter by status"),
        ("category" = Option<ReportCategory>, Query, description = "Filter by category"),
        ("search" = Option<String>, Query, description = "Search title and description"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "The caller's reports, newest first", body = MyReportsResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "reports"
)]
pub async fn list_my_reports(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Query(params): Query<MyReportsQuery>,
) -> AppResult<impl IntoResponse> {
    let mine = workflow.reports().query_by_reporter(&identity.id).await;
    let summary = student_summary(&mine);

    let filter = ReportFilter {
        bucket: Bucket::All,
        status: params.status,
        category: params.category,
        priority: None,
        search: params.search,
        search_scope: SearchScope::Content,
    };
    let pagination = PaginationQuery {
        page: params.page,
        per_page: params.per_page,
    };
    let reports = PaginatedResponse::from_vec(filter_reports(&mine, &filter), &pagination);

    Ok(ApiResponse::ok(MyReportsResponse { summary, reports }))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    security(("jwt_token" = [])),
    params(("id" = u64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report with its comment thread", body = ReportDetailResponse),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Report not found", body = AppError),
    ),
    tag = "reports"
)]
pub async fn get_report(
    Extension(workflow): Extension<Workflow>,
    _identity: Identity,
    Path(id): Path<ReportId>,
) -> AppResult<impl IntoResponse> {
    let report = workflow.reports().get(id).await?;
    let comments = workflow
        .comments()
        .list_for(id)
        .into_iter()
        .map(CommentResponse::from)
        .collect();
    let next_statuses = workflow.reports().policy().targets(report.status);

    Ok(ApiResponse::ok(ReportDetailResponse {
        report,
        comments,
        next_statuses,
    }))
}
