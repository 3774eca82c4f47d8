//! Document domain entity and lifecycle status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a stored document.
///
/// `Created` and `Uploaded` may only move to `Deleted`; `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Created,
    Uploaded,
    Deleted,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 3] = [
        DocumentStatus::Created,
        DocumentStatus::Uploaded,
        DocumentStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Created => "CREATED",
            DocumentStatus::Uploaded => "UPLOADED",
            DocumentStatus::Deleted => "DELETED",
        }
    }

    /// Whether a record in this status may move to `next`.
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Created, DocumentStatus::Deleted)
                | (DocumentStatus::Uploaded, DocumentStatus::Deleted)
        )
    }

    /// Statuses from which a record may move to `next`.
    pub fn sources_of(next: DocumentStatus) -> Vec<DocumentStatus> {
        Self::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(next))
            .collect()
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown status '{}', expected one of CREATED, UPLOADED, DELETED",
            self.0
        )
    }
}

impl FromStr for DocumentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(DocumentStatus::Created),
            "UPLOADED" => Ok(DocumentStatus::Uploaded),
            "DELETED" => Ok(DocumentStatus::Deleted),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Document record as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Document {
    #[schema(example = 1)]
    pub id: i64,
    /// Stored (generated) file name
    #[schema(example = "report_20240101_1704067200000000000.pdf")]
    pub filename: String,
    /// Client-side file name, present for uploads only
    pub original_name: Option<String>,
    /// Public path the file is served under
    #[schema(example = "/uploads/pdf/report_20240101_1704067200000000000.pdf")]
    pub filepath: String,
    /// Size in bytes
    pub size: i64,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data needed to register a newly stored file
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub original_name: Option<String>,
    pub filepath: String,
    pub size: i64,
    pub status: DocumentStatus,
}
