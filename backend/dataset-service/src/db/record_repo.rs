/// Record repository - database operations for the `pokemon` table
use crate::models::{Dataset, FullDataset};
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

// generation is cast so INTEGER and BIGINT tables decode alike
const SELECT_PAGE: &str = r#"
    SELECT name, type_1, type_2, generation::INT8 AS generation, legendary
    FROM pokemon
    LIMIT $1 OFFSET $2
"#;

const INSERT_RECORD: &str = r#"
    INSERT INTO pokemon (
        id, name, type_1, type_2, total, hp, attack, defense, sp_atk, sp_def,
        speed, generation, legendary
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13
    )
"#;

const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM pokemon";

/// Persistence failures, already sorted into what the handlers care about
#[derive(Debug, Error)]
pub enum RepoError {
    /// SQLSTATE class 22: value does not fit the column
    #[error("invalid data format: {0}")]
    InvalidData(String),

    /// SQLSTATE 23505
    #[error("duplicated data: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlStateClass {
    DataException,
    UniqueViolation,
    Other,
}

/// Sort a PostgreSQL SQLSTATE code into the classes the service distinguishes
pub fn classify_sqlstate(code: &str) -> SqlStateClass {
    if code == "23505" {
        SqlStateClass::UniqueViolation
    } else if code.starts_with("22") {
        SqlStateClass::DataException
    } else {
        SqlStateClass::Other
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        let class = err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| classify_sqlstate(&code))
            .unwrap_or(SqlStateClass::Other);

        match class {
            SqlStateClass::DataException => RepoError::InvalidData(err.to_string()),
            SqlStateClass::UniqueViolation => RepoError::Duplicate(err.to_string()),
            SqlStateClass::Other => RepoError::Database(err.to_string()),
        }
    }
}

/// Storage backing the dataset endpoints
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Up to `limit` rows starting at `offset`, in storage order
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<Dataset>, RepoError>;

    /// Insert one row; no surrounding transaction
    async fn insert_record(&self, record: &FullDataset) -> Result<(), RepoError>;

    async fn count_records(&self) -> Result<i64, RepoError>;

    /// Cheap liveness check
    async fn ping(&self) -> Result<(), RepoError>;
}

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<Dataset>, RepoError> {
        let rows = sqlx::query_as::<_, Dataset>(SELECT_PAGE)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn insert_record(&self, record: &FullDataset) -> Result<(), RepoError> {
        sqlx::query(INSERT_RECORD)
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.type_1)
            .bind(&record.type_2)
            .bind(record.total)
            .bind(record.hp)
            .bind(record.attack)
            .bind(record.defense)
            .bind(record.sp_atk)
            .bind(record.sp_def)
            .bind(record.speed)
            .bind(record.generation)
            .bind(record.legendary)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_records(&self) -> Result<i64, RepoError> {
        let total = sqlx::query_scalar::<_, i64>(COUNT_RECORDS)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
