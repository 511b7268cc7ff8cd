//! PostgreSQL implementation of ApplicantRepository.
//!
//! The canonical record and the uploaded-document list are stored as
//! JSONB; workflow columns are first-class so the dashboard can filter
//! without unpacking JSON.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{ArtistId, DomainError, ErrorCode};
use crate::domain::tracker::{ArtistStatus, TrackedArtist, VisaDocument};
use crate::ports::ApplicantRepository;

/// PostgreSQL implementation of the ApplicantRepository port.
#[derive(Clone)]
pub struct PostgresApplicantRepository {
    pool: PgPool,
}

impl PostgresApplicantRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_artist(row: &sqlx::postgres::PgRow) -> Result<TrackedArtist, DomainError> {
    let id: Uuid = row.try_get("id").map_err(|e| db_error("read id", e))?;
    let record: serde_json::Value = row
        .try_get("record")
        .map_err(|e| db_error("read record", e))?;
    let status: String = row.try_get("status").map_err(|e| db_error("read status", e))?;
    let visa_documents: serde_json::Value = row
        .try_get("visa_documents")
        .map_err(|e| db_error("read visa_documents", e))?;
    let email_id: String = row
        .try_get("email_id")
        .map_err(|e| db_error("read email_id", e))?;
    let recipient_email: String = row
        .try_get("recipient_email")
        .map_err(|e| db_error("read recipient_email", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("read created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("read updated_at", e))?;

    let record = serde_json::from_value(record).map_err(|e| db_error("decode record", e))?;
    let visa_documents: Vec<VisaDocument> =
        serde_json::from_value(visa_documents).map_err(|e| db_error("decode visa_documents", e))?;
    let status: ArtistStatus = status.parse()?;

    Ok(TrackedArtist {
        id: ArtistId::from_uuid(id),
        record,
        status,
        visa_documents,
        email_id,
        recipient_email,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl ApplicantRepository for PostgresApplicantRepository {
    async fn save(&self, user_email: &str, artist: &TrackedArtist) -> Result<(), DomainError> {
        let record = serde_json::to_value(&artist.record)
            .map_err(|e| db_error("encode record", e))?;
        let visa_documents = serde_json::to_value(&artist.visa_documents)
            .map_err(|e| db_error("encode visa_documents", e))?;

        sqlx::query(
            r#"
            INSERT INTO applicants
                (id, user_email, record, status, visa_documents, email_id,
                 recipient_email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(artist.id.as_uuid())
        .bind(user_email)
        .bind(record)
        .bind(artist.status.as_str())
        .bind(visa_documents)
        .bind(&artist.email_id)
        .bind(&artist.recipient_email)
        .bind(artist.created_at)
        .bind(artist.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert applicant", e))?;

        Ok(())
    }

    async fn find_by_user(&self, user_email: &str) -> Result<Vec<TrackedArtist>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, record, status, visa_documents, email_id,
                   recipient_email, created_at, updated_at
            FROM applicants
            WHERE user_email = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("select applicants", e))?;

        rows.iter().map(row_to_artist).collect()
    }

    async fn find_by_id(&self, id: &ArtistId) -> Result<Option<TrackedArtist>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, record, status, visa_documents, email_id,
                   recipient_email, created_at, updated_at
            FROM applicants
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("select applicant", e))?;

        row.as_ref().map(row_to_artist).transpose()
    }

    async fn update(&self, artist: &TrackedArtist) -> Result<(), DomainError> {
        let record = serde_json::to_value(&artist.record)
            .map_err(|e| db_error("encode record", e))?;
        let visa_documents = serde_json::to_value(&artist.visa_documents)
            .map_err(|e| db_error("encode visa_documents", e))?;

        let result = sqlx::query(
            r#"
            UPDATE applicants
            SET record = $2, status = $3, visa_documents = $4,
                email_id = $5, recipient_email = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(artist.id.as_uuid())
        .bind(record)
        .bind(artist.status.as_str())
        .bind(visa_documents)
        .bind(&artist.email_id)
        .bind(&artist.recipient_email)
        .bind(artist.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update applicant", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::artist_not_found(artist.id));
        }
        Ok(())
    }

    async fn delete(&self, id: &ArtistId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM applicants WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete applicant", e))?;
        Ok(())
    }
}
