//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, document_handler, role_handler};
use crate::domain::{Document, DocumentStatus, Role, UserResponse};
use crate::services::LoginResponse;
use crate::types::PaginationMeta;

/// OpenAPI documentation for the PDF Management API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Management API",
        version = "0.1.0",
        description = "Generate, upload, list and soft-delete PDF documents",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Roles
        role_handler::list_roles,
        // Document endpoints
        document_handler::generate_pdf,
        document_handler::upload_pdf,
        document_handler::list_pdfs,
        document_handler::delete_pdf,
    ),
    components(
        schemas(
            // Domain types
            Document,
            DocumentStatus,
            Role,
            UserResponse,
            PaginationMeta,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            LoginResponse,
            // Document handler types
            document_handler::GenerateRequest,
            document_handler::UploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Roles", description = "Role lookup"),
        (name = "Documents", description = "PDF generation, upload, listing and deletion")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
