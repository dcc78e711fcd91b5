//! SQLite storage for generated contracts and their sections.
//!
//! The store is constructed once at startup and passed by handle; every
//! operation returns a typed result so callers cannot mistake a missing row
//! for a database failure. Saves and deletes are single transactions over
//! the contract row and its section rows.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use contract_engine::{ContractType, Section};
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("contract not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One persisted contract row; sections are stored separately.
#[derive(Debug, Clone, FromRow)]
pub struct ContractRecord {
    pub id: String,
    pub contract_type: String,
    /// JSON snapshot of the request's business context.
    pub business_context: String,
    pub language: String,
    pub html_content: String,
    pub raw_content: String,
    pub total_sections: i64,
    pub estimated_pages: i64,
    pub generation_time: f64,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inputs for a single contract save.
#[derive(Debug)]
pub struct NewContract<'a> {
    pub id: &'a str,
    pub contract_type: ContractType,
    pub business_context_json: String,
    pub language: &'a str,
    pub html_content: &'a str,
    pub raw_content: &'a str,
    pub total_sections: u32,
    pub estimated_pages: u32,
    pub generation_time: f64,
    pub model_used: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ContractStats {
    pub total_contracts: i64,
    pub contracts_by_type: HashMap<String, i64>,
    pub recent_contracts: i64,
}

#[derive(Debug, FromRow)]
struct SectionRow {
    title: String,
    content: String,
    section_number: i64,
    subsection_number: Option<i64>,
}

impl From<SectionRow> for Section {
    fn from(row: SectionRow) -> Self {
        Section {
            title: row.title,
            content: row.content,
            section_number: row.section_number as u32,
            subsection_number: row.subsection_number.map(|n| n as u32),
        }
    }
}

const CONTRACT_COLUMNS: &str = "id, contract_type, business_context, language, html_content, \
                                raw_content, total_sections, estimated_pages, generation_time, \
                                model_used, created_at, updated_at";

#[derive(Clone)]
pub struct ContractStore {
    db: SqlitePool,
}

impl ContractStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::with_pool(pool).await
    }

    /// Wraps an existing pool; tests hand in in-memory databases here.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { db: pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contracts (
                id TEXT PRIMARY KEY,
                contract_type TEXT NOT NULL,
                business_context TEXT NOT NULL,
                language TEXT NOT NULL,
                html_content TEXT NOT NULL,
                raw_content TEXT NOT NULL,
                total_sections INTEGER NOT NULL,
                estimated_pages INTEGER NOT NULL,
                generation_time REAL NOT NULL,
                model_used TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contract_sections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                contract_id TEXT NOT NULL REFERENCES contracts (id),
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                section_number INTEGER NOT NULL,
                subsection_number INTEGER
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sections_contract ON contract_sections(contract_id)",
        )
        .execute(&self.db)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_contracts_created ON contracts(created_at)")
            .execute(&self.db)
            .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Persists a contract and its sections as one transaction.
    pub async fn save_contract(
        &self,
        contract: NewContract<'_>,
        sections: &[Section],
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, contract_type, business_context, language, html_content, raw_content,
                total_sections, estimated_pages, generation_time, model_used, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(contract.id)
        .bind(contract.contract_type.as_str())
        .bind(&contract.business_context_json)
        .bind(contract.language)
        .bind(contract.html_content)
        .bind(contract.raw_content)
        .bind(contract.total_sections as i64)
        .bind(contract.estimated_pages as i64)
        .bind(contract.generation_time)
        .bind(contract.model_used)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        for section in sections {
            sqlx::query(
                r#"
                INSERT INTO contract_sections (
                    contract_id, title, content, section_number, subsection_number
                ) VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(contract.id)
            .bind(&section.title)
            .bind(&section.content)
            .bind(section.section_number as i64)
            .bind(section.subsection_number.map(|n| n as i64))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!("Contract {} saved to database", contract.id);
        Ok(())
    }

    /// Fetches a contract and its ordered sections.
    pub async fn get_contract(
        &self,
        id: &str,
    ) -> Result<(ContractRecord, Vec<Section>), StoreError> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = ?");
        let record: Option<ContractRecord> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        let record = record.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Parents (NULL subsection) sort ahead of their subsections.
        let rows: Vec<SectionRow> = sqlx::query_as(
            r#"
            SELECT title, content, section_number, subsection_number
            FROM contract_sections
            WHERE contract_id = ?
            ORDER BY section_number, subsection_number
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok((record, rows.into_iter().map(Section::from).collect()))
    }

    /// Lists contracts newest-first, with the exact total for pagination.
    pub async fn list_contracts(
        &self,
        limit: i64,
        offset: i64,
        contract_type: Option<&str>,
    ) -> Result<(Vec<ContractRecord>, i64), StoreError> {
        let (records, total) = match contract_type {
            Some(type_filter) => {
                let query = format!(
                    "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE contract_type = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?"
                );
                let records: Vec<ContractRecord> = sqlx::query_as(&query)
                    .bind(type_filter)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.db)
                    .await?;
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE contract_type = ?")
                        .bind(type_filter)
                        .fetch_one(&self.db)
                        .await?;
                (records, total)
            }
            None => {
                let query = format!(
                    "SELECT {CONTRACT_COLUMNS} FROM contracts \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?"
                );
                let records: Vec<ContractRecord> = sqlx::query_as(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.db)
                    .await?;
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contracts")
                    .fetch_one(&self.db)
                    .await?;
                (records, total)
            }
        };

        Ok((records, total))
    }

    /// Deletes a contract and its sections together; all-or-nothing.
    pub async fn delete_contract(&self, id: &str) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM contract_sections WHERE contract_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM contracts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tx.commit().await?;
        tracing::info!("Contract {} deleted from database", id);
        Ok(())
    }

    /// Database statistics for the stats endpoint.
    pub async fn stats(&self) -> Result<ContractStats, StoreError> {
        let total_contracts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contracts")
            .fetch_one(&self.db)
            .await?;

        let by_type: Vec<(String, i64)> = sqlx::query_as(
            "SELECT contract_type, COUNT(*) FROM contracts GROUP BY contract_type",
        )
        .fetch_all(&self.db)
        .await?;

        let cutoff = (Utc::now() - Duration::days(7)).to_rfc3339();
        let recent_contracts: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE created_at >= ?")
                .bind(cutoff)
                .fetch_one(&self.db)
                .await?;

        Ok(ContractStats {
            total_contracts,
            contracts_by_type: by_type.into_iter().collect(),
            recent_contracts,
        })
    }
}
