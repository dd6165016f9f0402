//! services/engine/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ReportStore` port from the `core` crate. It keeps the knowledge base of
//! quality reports in PostgreSQL using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use content_quality_core::domain::{QualityReport, ReportOrigin, StoredReport};
use content_quality_core::ports::{PortError, PortResult, ReportStore};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ReportStore` port.
#[derive(Clone)]
pub struct DbReportStore {
    pool: PgPool,
}

impl DbReportStore {
    /// Creates a new `DbReportStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct ReportRecord {
    id: Uuid,
    origin: String,
    topic: Option<String>,
    title: String,
    report: Json<QualityReport>,
    created_at: DateTime<Utc>,
}

impl ReportRecord {
    fn to_domain(self) -> PortResult<StoredReport> {
        let origin = match self.origin.as_str() {
            "gate" => ReportOrigin::Gate,
            "audit" => ReportOrigin::Audit,
            other => {
                return Err(PortError::Unexpected(format!(
                    "Report {} has an unknown origin '{}'",
                    self.id, other
                )))
            }
        };
        Ok(StoredReport {
            id: self.id,
            origin,
            topic: self.topic,
            title: self.title,
            report: self.report.0,
            created_at: self.created_at,
        })
    }
}

//=========================================================================================
// `ReportStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReportStore for DbReportStore {
    async fn save_report(&self, stored: &StoredReport) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO quality_reports (id, draft_id, origin, topic, title, overall_score, passed, report, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(stored.id)
        .bind(stored.report.draft_id)
        .bind(stored.origin.as_str())
        .bind(stored.topic.as_deref())
        .bind(&stored.title)
        .bind(stored.report.overall_score)
        .bind(stored.report.passed)
        .bind(Json(&stored.report))
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn recent_reports(&self, limit: usize) -> PortResult<Vec<StoredReport>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let records = sqlx::query_as::<_, ReportRecord>(
            "SELECT id, origin, topic, title, report, created_at FROM quality_reports \
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(ReportRecord::to_domain).collect()
    }
}
