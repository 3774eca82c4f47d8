//! PDF document handlers. Every route here sits behind `auth_middleware`.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{PathRejection, QueryRejection},
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateUrl, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::AuthPrincipal;
use crate::api::AppState;
use crate::config::{ACCEPTED_UPLOAD_CONTENT_TYPES, MAX_UPLOAD_BYTES, UPLOAD_FIELD_NAME};
use crate::domain::{Document, DocumentStatus};
use crate::errors::{AppError, AppResult};
use crate::services::{ReportRequest, UploadedFile};
use crate::types::{ApiResponse, Paginated, PaginationParams};

/// Report generation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Quarterly Report")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "ACME Corp")]
    pub institution_name: String,
    #[serde(default)]
    #[schema(example = "1 Main Street")]
    pub address: String,
    #[serde(default)]
    #[schema(example = "0800123")]
    pub phone: String,
    /// Optional logo image; leave empty for none
    #[serde(default)]
    #[validate(custom(function = "validate_logo_url"))]
    #[schema(example = "https://example.com/logo.png")]
    pub logo_url: String,
    /// Free text body; blank lines separate paragraphs
    #[serde(default)]
    pub content: String,
}

fn validate_logo_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() || url.validate_url() {
        return Ok(());
    }

    let mut error = ValidationError::new("url");
    error.message = Some("Logo URL must be a valid URL".into());
    Err(error)
}

/// Multipart upload form
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// PDF file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Listing query
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListDocumentsQuery {
    /// CREATED, UPLOADED or DELETED (case-insensitive)
    pub status: Option<String>,
    /// Page number, 1-indexed (default 1)
    #[serde(default, deserialize_with = "optional_number")]
    pub page: Option<i64>,
    /// Items per page (default 10, max 100)
    #[serde(default, deserialize_with = "optional_number")]
    pub limit: Option<i64>,
}

/// Blank or non-numeric query values count as absent
fn optional_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl ListDocumentsQuery {
    fn status(&self) -> AppResult<Option<DocumentStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse::<DocumentStatus>()
                .map(Some)
                .map_err(|e| AppError::validation(e.to_string())),
        }
    }
}

/// Create document routes
pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_pdf))
        .route(
            "/upload",
            post(upload_pdf).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/list", get(list_pdfs))
        .route("/:id", delete(delete_pdf))
}

/// Generate a PDF report
#[utoipa::path(
    post,
    path = "/api/pdf/generate",
    tag = "Documents",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "PDF generated successfully", body = Document),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Rendering or storage failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_pdf(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    ValidatedJson(payload): ValidatedJson<GenerateRequest>,
) -> AppResult<Json<ApiResponse<Document>>> {
    tracing::debug!(user_id = principal.user_id, "Generating PDF");

    let document = state
        .document_service
        .generate(ReportRequest {
            title: payload.title,
            institution_name: payload.institution_name,
            address: payload.address,
            phone: payload.phone,
            logo_url: payload.logo_url,
            content: payload.content,
        })
        .await?;

    Ok(Json(ApiResponse::with_message(
        document,
        "PDF generated successfully",
    )))
}

/// Upload a PDF file
#[utoipa::path(
    post,
    path = "/api/pdf/upload",
    tag = "Documents",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF uploaded successfully", body = Document),
        (status = 400, description = "Missing file or not a PDF"),
        (status = 401, description = "Not authenticated"),
        (status = 413, description = "File exceeds 10MB")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_pdf(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ApiResponse<Document>>> {
    let mut multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        if !is_accepted_content_type(field.content_type()) {
            return Err(AppError::InvalidFileType);
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        tracing::debug!(
            user_id = principal.user_id,
            original_name = %original_name,
            size = bytes.len(),
            "Receiving upload"
        );

        let document = state
            .document_service
            .upload(UploadedFile {
                original_name,
                bytes: bytes.to_vec(),
            })
            .await?;

        return Ok(Json(ApiResponse::with_message(
            document,
            "PDF uploaded successfully",
        )));
    }

    Err(AppError::bad_request("Missing file part"))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::bad_request(err.body_text())
    }
}

/// Declared content type, ignoring parameters. Absent is accepted.
fn is_accepted_content_type(content_type: Option<&str>) -> bool {
    let Some(declared) = content_type else {
        return true;
    };

    let essence = declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    ACCEPTED_UPLOAD_CONTENT_TYPES.contains(&essence.as_str())
}

/// List documents, newest first
#[utoipa::path(
    get,
    path = "/api/pdf/list",
    tag = "Documents",
    params(ListDocumentsQuery),
    responses(
        (status = 200, description = "One page of documents"),
        (status = 400, description = "Invalid query"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pdfs(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
    query: Result<Query<ListDocumentsQuery>, QueryRejection>,
) -> AppResult<Json<Paginated<Document>>> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;

    let status = query.status()?;
    let params = PaginationParams::new(query.page, query.limit);

    let page = state.document_service.list(status, params).await?;
    Ok(Json(page))
}

/// Soft delete a document
#[utoipa::path(
    delete,
    path = "/api/pdf/{id}",
    tag = "Documents",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "PDF deleted successfully", body = Document),
        (status = 400, description = "Already deleted or invalid ID"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_pdf(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ApiResponse<Document>>> {
    let Path(id) = id.map_err(|_| AppError::bad_request("Invalid ID"))?;

    let document = state.document_service.delete(id).await?;
    tracing::debug!(user_id = principal.user_id, document_id = id, "Delete requested");

    Ok(Json(ApiResponse::with_message(
        document,
        "PDF deleted successfully",
    )))
}
