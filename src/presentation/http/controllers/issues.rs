// src/presentation/http/controllers/issues.rs
use super::multipart::FormData;
use crate::application::{
    commands::issues::{ReportIssueCommand, SubmitFeedbackCommand, UpdateIssueStatusCommand},
    dto::{FeedbackDto, IssueDto, ReportDocument, StatusEntryDto},
    error::ApplicationError,
    queries::issues::ListIssuesQuery,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::IssueListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Fields of the issue submission form.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct CreateIssueForm {
    /// One of the labels returned by `/api/v1/catalog`.
    pub issue_type: String,
    pub issue_description: String,
    pub area: String,
    pub street: Option<String>,
    pub landmark: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub before_image: Option<Vec<u8>>,
}

/// Fields of the administrative status update form.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct UpdateStatusForm {
    /// Keeps the current status when omitted.
    pub status: Option<String>,
    pub remarks: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub after_image: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    /// 1 to 5.
    pub rating: i64,
    #[serde(default)]
    pub comments: Option<String>,
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListIssuesParams {
    /// Only issues whose current status equals this value.
    #[serde(default)]
    pub status: Option<String>,
    /// Only the caller's own issues.
    #[serde(default)]
    pub mine: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/issues",
    request_body(content = CreateIssueForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Issue recorded with its opening ledger entry.", body = IssueDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn create_issue(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<IssueDto>)> {
    let mut form = FormData::read(multipart).await?;
    let command = ReportIssueCommand {
        issue_type: form.required("issue_type")?,
        description: form.required("issue_description")?,
        area: form.required("area")?,
        street: form.text("street"),
        landmark: form.text("landmark"),
        name: form.text("name"),
        email: form.text("email"),
        phone: form.text("phone"),
        before_image: form.file("before_image"),
    };

    let issue = state
        .services
        .issue_commands
        .report_issue(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(issue)))
}

#[utoipa::path(
    get,
    path = "/api/v1/issues",
    params(ListIssuesParams),
    responses(
        (status = 200, description = "Issues, newest first.", body = IssueListResponse),
        (status = 400, description = "Invalid cursor or filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn list_issues(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListIssuesParams>,
) -> HttpResult<Json<IssueListResponse>> {
    let query = ListIssuesQuery {
        status: params.status,
        mine: params.mine,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .issue_queries
        .list_issues(&user, query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/issues/{id}",
    params(("id" = i64, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "The issue.", body = IssueDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such issue.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn get_issue(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<IssueDto>> {
    state
        .services
        .issue_queries
        .get_issue(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/issues/{id}/history",
    params(("id" = i64, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "Status ledger, oldest first.", body = [StatusEntryDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such issue.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn issue_history(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<StatusEntryDto>>> {
    state
        .services
        .issue_queries
        .issue_history(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/issues/{id}/status",
    params(("id" = i64, Path, description = "Issue identifier")),
    request_body(content = UpdateStatusForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transition appended to the ledger.", body = IssueDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such issue.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn update_status(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<IssueDto>> {
    let mut form = FormData::read(multipart).await?;
    let command = UpdateIssueStatusCommand {
        issue_id: id,
        status: form.text("status"),
        remarks: form.text("remarks"),
        after_image: form.file("after_image"),
    };

    state
        .services
        .issue_commands
        .update_status(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/issues/{id}/feedback",
    params(("id" = i64, Path, description = "Issue identifier")),
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback recorded.", body = FeedbackDto),
        (status = 400, description = "Rating outside 1-5.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such issue.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn submit_feedback(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<FeedbackRequest>,
) -> HttpResult<(StatusCode, Json<FeedbackDto>)> {
    let command = SubmitFeedbackCommand {
        issue_id: id,
        rating: payload.rating,
        comments: payload.comments,
    };

    let feedback = state
        .services
        .issue_commands
        .submit_feedback(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

#[utoipa::path(
    get,
    path = "/api/v1/issues/{id}/report",
    params(("id" = i64, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "PDF case report.", body = String, content_type = "application/pdf"),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such issue.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Report unavailable.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Issues"
)]
pub async fn issue_report(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Response> {
    let ReportDocument { file_name, bytes } = state
        .services
        .issue_queries
        .issue_report(&user, id)
        .await
        .into_http()?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|_| {
            HttpError::from_error(ApplicationError::infrastructure("invalid report file name"))
        })?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(ReportDocument::CONTENT_TYPE),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
