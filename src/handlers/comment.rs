use crate::error::{AppError, AppResult};
use crate::models::{report::not_blank, Attachment, Comment, Identity, NewComment, ReportId, UserRole};
use crate::response::ApiResponse;
use crate::services::Workflow;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Comment body; surrounding whitespace is dropped
    #[validate(length(max = 5000), custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub report_id: ReportId,
    pub author_id: String,
    pub author_name: String,
    pub author_role: UserRole,
    /// Render the staff badge
    pub author_is_staff: bool,
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            author_is_staff: c.author_is_staff(),
            id: c.id,
            report_id: c.report_id,
            author_id: c.author_id,
            author_name: c.author_name,
            author_role: c.author_role,
            content: c.content,
            attachments: c.attachments,
            created_at: c.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}/comments",
    security(("jwt_token" = [])),
    params(("id" = u64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Comments, oldest first", body = Vec<CommentResponse>),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    Extension(workflow): Extension<Workflow>,
    _identity: Identity,
    Path(report_id): Path<ReportId>,
) -> AppResult<impl IntoResponse> {
    let comments: Vec<CommentResponse> = workflow
        .comments()
        .list_for(report_id)
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(ApiResponse::ok(comments))
}

#[utoipa::path(
    post,
    path = "/api/v1/reports/{id}/comments",
    security(("jwt_token" = [])),
    params(("id" = u64, Path, description = "Report ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Report not found", body = AppError),
    ),
    tag = "comments"
)]
pub async fn create_comment(
    Extension(workflow): Extension<Workflow>,
    identity: Identity,
    Path(report_id): Path<ReportId>,
    Json(payload): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let comment = workflow
        .comments()
        .append(
            report_id,
            NewComment {
                author_id: identity.id,
                author_name: identity.name,
                author_role: identity.role,
                content: payload.content.trim().to_string(),
                attachments: payload.attachments,
            },
        )
        .await?;

    Ok(ApiResponse::with_message(
        CommentResponse::from(comment),
        "Comment added",
    ))
}
