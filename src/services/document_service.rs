//! Document service - generation, upload, listing and soft deletion.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::{GENERATED_FILE_PREFIX, PDF_EXTENSION, UPLOADED_FILE_PREFIX};
use crate::domain::{Document, DocumentStatus, NewDocument};
use crate::errors::{AppError, AppResult};
use crate::infra::{DocumentRepository, FileStorage, LogoSource, StoredFile};
use crate::render::{render_report, ReportContent};
use crate::types::{Paginated, PaginationParams};

/// Input for a generated report
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub title: String,
    pub institution_name: String,
    pub address: String,
    pub phone: String,
    /// Empty means no logo
    pub logo_url: String,
    pub content: String,
}

/// A file received from a client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Render a report, store it and register it as `CREATED`
    async fn generate(&self, request: ReportRequest) -> AppResult<Document>;

    /// Store an uploaded PDF and register it as `UPLOADED`
    async fn upload(&self, file: UploadedFile) -> AppResult<Document>;

    /// Page through documents, newest first
    async fn list(
        &self,
        status: Option<DocumentStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<Document>>;

    /// Soft delete a live document
    async fn delete(&self, id: i64) -> AppResult<Document>;
}

/// Concrete implementation of DocumentService
pub struct DocumentManager {
    documents: Arc<dyn DocumentRepository>,
    storage: FileStorage,
    logos: Arc<dyn LogoSource>,
}

impl DocumentManager {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        storage: FileStorage,
        logos: Arc<dyn LogoSource>,
    ) -> Self {
        Self {
            documents,
            storage,
            logos,
        }
    }

    /// Register a stored file, removing it again if the insert fails.
    async fn register(
        &self,
        stored: StoredFile,
        original_name: Option<String>,
        status: DocumentStatus,
    ) -> AppResult<Document> {
        let record = NewDocument {
            filename: stored.filename.clone(),
            original_name,
            filepath: stored.public_path.clone(),
            size: stored.size as i64,
            status,
        };

        match self.documents.create(record).await {
            Ok(document) => Ok(document),
            Err(e) => {
                self.storage.remove(&stored).await;
                Err(e)
            }
        }
    }
}

/// Base name of a client-supplied path, if it has a `.pdf` extension
fn pdf_file_name(original_name: &str) -> Option<String> {
    let name = Path::new(original_name.trim()).file_name()?.to_str()?;
    let is_pdf = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION));

    is_pdf.then(|| name.to_string())
}

#[async_trait]
impl DocumentService for DocumentManager {
    async fn generate(&self, request: ReportRequest) -> AppResult<Document> {
        let logo_url = request.logo_url.trim();
        let logo = if logo_url.is_empty() {
            None
        } else {
            self.logos.fetch(logo_url).await
        };

        let content = ReportContent {
            title: request.title,
            institution_name: request.institution_name,
            address: request.address,
            phone: request.phone,
            body: request.content,
            generated_at: Utc::now(),
        };

        let bytes = tokio::task::spawn_blocking(move || render_report(&content, logo.as_deref()))
            .await
            .map_err(|e| AppError::render(format!("Render task failed: {}", e)))??;

        let stored = self.storage.store(GENERATED_FILE_PREFIX, &bytes).await?;
        let document = self.register(stored, None, DocumentStatus::Created).await?;

        tracing::info!(
            document_id = document.id,
            filename = %document.filename,
            size = document.size,
            "Generated PDF"
        );
        Ok(document)
    }

    async fn upload(&self, file: UploadedFile) -> AppResult<Document> {
        let original_name = pdf_file_name(&file.original_name).ok_or_else(|| {
            tracing::debug!(original_name = %file.original_name, "Rejected non-PDF upload");
            AppError::InvalidFileType
        })?;

        let stored = self.storage.store(UPLOADED_FILE_PREFIX, &file.bytes).await?;
        let document = self
            .register(stored, Some(original_name), DocumentStatus::Uploaded)
            .await?;

        tracing::info!(
            document_id = document.id,
            filename = %document.filename,
            size = document.size,
            "Uploaded PDF"
        );
        Ok(document)
    }

    async fn list(
        &self,
        status: Option<DocumentStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<Document>> {
        let (documents, total) = self.documents.list(status, params.clone()).await?;
        Ok(Paginated::new(documents, &params, total))
    }

    async fn delete(&self, id: i64) -> AppResult<Document> {
        let document = self.documents.soft_delete(id).await?;

        tracing::info!(document_id = id, "Document soft-deleted");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::infra::{MockDocumentRepository, NoLogo};

    fn document(id: i64, status: DocumentStatus) -> Document {
        Document {
            id,
            filename: format!("report_{}.pdf", id),
            original_name: None,
            filepath: format!("/uploads/pdf/report_{}.pdf", id),
            size: 100,
            status,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: (status == DocumentStatus::Deleted).then(Utc::now),
        }
    }

    fn echo_create(repo: &mut MockDocumentRepository) {
        repo.expect_create().returning(|new| {
            Ok(Document {
                id: 1,
                filename: new.filename,
                original_name: new.original_name,
                filepath: new.filepath,
                size: new.size,
                status: new.status,
                created_at: Utc::now(),
                updated_at: None,
                deleted_at: None,
            })
        });
    }

    fn manager(repo: MockDocumentRepository, root: &Path) -> DocumentManager {
        DocumentManager::new(Arc::new(repo), FileStorage::new(root), Arc::new(NoLogo))
    }

    fn stored_files(root: &Path) -> usize {
        std::fs::read_dir(root.join("pdf"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("report.pdf"), Some("report.pdf".to_string()));
        assert_eq!(pdf_file_name("REPORT.PDF"), Some("REPORT.PDF".to_string()));
        assert_eq!(pdf_file_name("../../etc/x.pdf"), Some("x.pdf".to_string()));
        assert_eq!(pdf_file_name("report.txt"), None);
        assert_eq!(pdf_file_name("report.pdf.exe"), None);
        assert_eq!(pdf_file_name("pdf"), None);
        assert_eq!(pdf_file_name(""), None);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockDocumentRepository::new();
        repo.expect_create().never();

        let result = manager(repo, dir.path())
            .upload(UploadedFile {
                original_name: "report.txt".to_string(),
                bytes: b"%PDF-1.4".to_vec(),
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidFileType)));
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_upload_stores_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockDocumentRepository::new();
        echo_create(&mut repo);

        let service = manager(repo, dir.path());
        let document = service
            .upload(UploadedFile {
                original_name: "invoice.pdf".to_string(),
                bytes: b"%PDF-1.4 payload".to_vec(),
            })
            .await
            .unwrap();

        assert_eq!(document.status, DocumentStatus::Uploaded);
        assert_eq!(document.original_name.as_deref(), Some("invoice.pdf"));
        assert_eq!(document.size, 16);
        assert!(document.filename.starts_with("upload_"));

        let path = service.storage.pdf_dir().join(&document.filename);
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4 payload");
    }

    #[tokio::test]
    async fn test_generate_registers_created_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockDocumentRepository::new();
        echo_create(&mut repo);

        let service = manager(repo, dir.path());
        let document = service
            .generate(ReportRequest {
                title: "Monthly".to_string(),
                content: "Body text".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(document.status, DocumentStatus::Created);
        assert!(document.filename.starts_with("report_"));
        assert!(document.original_name.is_none());

        let bytes = std::fs::read(service.storage.pdf_dir().join(&document.filename)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(document.size, bytes.len() as i64);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockDocumentRepository::new();
        repo.expect_create()
            .returning(|_| Err(AppError::internal("insert failed")));

        let result = manager(repo, dir.path())
            .generate(ReportRequest {
                title: "Monthly".to_string(),
                ..Default::default()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_list_wraps_page_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockDocumentRepository::new();
        repo.expect_list()
            .withf(|status, params| {
                *status == Some(DocumentStatus::Uploaded) && params.page() == 3 && params.limit() == 2
            })
            .returning(|_, _| Ok((vec![document(1, DocumentStatus::Uploaded)], 5)));

        let page = manager(repo, dir.path())
            .list(
                Some(DocumentStatus::Uploaded),
                PaginationParams::new(Some(3), Some(2)),
            )
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.page, 3);
    }

    #[tokio::test]
    async fn test_delete_passes_through_repository_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = MockDocumentRepository::new();
        repo.expect_soft_delete()
            .with(eq(1))
            .returning(|id| Ok(document(id, DocumentStatus::Deleted)));
        repo.expect_soft_delete()
            .with(eq(2))
            .returning(|_| Err(AppError::AlreadyDeleted));

        let service = manager(repo, dir.path());

        let deleted = service.delete(1).await.unwrap();
        assert_eq!(deleted.status, DocumentStatus::Deleted);
        assert!(deleted.deleted_at.is_some());

        assert!(matches!(service.delete(2).await, Err(AppError::AlreadyDeleted)));
    }
}
