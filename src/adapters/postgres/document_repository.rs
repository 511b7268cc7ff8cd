//! PostgreSQL implementation of DocumentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};
use crate::ports::{DocumentRepository, ExtractionStatus, StoredDocument};

/// PostgreSQL implementation of the DocumentRepository port.
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn parse_status(s: &str) -> Result<ExtractionStatus, DomainError> {
    match s {
        "PENDING" => Ok(ExtractionStatus::Pending),
        "COMPLETED" => Ok(ExtractionStatus::Completed),
        "FAILED" => Ok(ExtractionStatus::Failed),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid extraction status: {}", other),
        )),
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &StoredDocument) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO documents
                (id, filename, file_data, extracted_text, status, processed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(&document.filename)
        .bind(&document.file_data)
        .bind(&document.extracted_text)
        .bind(document.status.as_str())
        .bind(document.processed_at)
        .bind(document.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert document", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<StoredDocument>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, filename, file_data, extracted_text, status, processed_at, created_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("select document", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: Uuid = row.try_get("id").map_err(|e| db_error("read id", e))?;
        let status: String = row.try_get("status").map_err(|e| db_error("read status", e))?;
        let processed_at: Option<DateTime<Utc>> = row
            .try_get("processed_at")
            .map_err(|e| db_error("read processed_at", e))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| db_error("read created_at", e))?;

        Ok(Some(StoredDocument {
            id: DocumentId::from_uuid(id),
            filename: row
                .try_get("filename")
                .map_err(|e| db_error("read filename", e))?,
            file_data: row
                .try_get("file_data")
                .map_err(|e| db_error("read file_data", e))?,
            extracted_text: row
                .try_get("extracted_text")
                .map_err(|e| db_error("read extracted_text", e))?,
            status: parse_status(&status)?,
            processed_at,
            created_at,
        }))
    }

    async fn mark_processed(
        &self,
        id: &DocumentId,
        extracted_text: &str,
        status: ExtractionStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET extracted_text = $2, status = $3, processed_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(extracted_text)
        .bind(status.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update document", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", id),
            ));
        }
        Ok(())
    }
}
