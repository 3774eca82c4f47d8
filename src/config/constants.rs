//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Roles
// =============================================================================

/// Labels seeded into an empty roles table at startup
pub const DEFAULT_ROLE_LABELS: &[&str] = &["Project Manager", "Financial", "HRD"];

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "pdf_management";

// =============================================================================
// Document storage
// =============================================================================

/// Default directory holding stored files (served under `/uploads`)
pub const DEFAULT_STORAGE_DIR: &str = "uploads";

/// Subdirectory of the storage root that holds PDFs
pub const PDF_SUBDIR: &str = "pdf";

/// URL prefix under which the storage root is served
pub const PUBLIC_STORAGE_PREFIX: &str = "/uploads";

/// Filename prefix for generated reports
pub const GENERATED_FILE_PREFIX: &str = "report";

/// Filename prefix for uploaded files
pub const UPLOADED_FILE_PREFIX: &str = "upload";

/// Only accepted document extension
pub const PDF_EXTENSION: &str = "pdf";

/// Maximum upload request body (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Content types accepted for uploads besides a missing one
pub const ACCEPTED_UPLOAD_CONTENT_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

// =============================================================================
// Logo fetching
// =============================================================================

/// Default bound on the header logo download
pub const DEFAULT_LOGO_FETCH_TIMEOUT_SECS: u64 = 5;

/// Largest logo payload accepted (2 MiB)
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
