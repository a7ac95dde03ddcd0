use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{Account, PredictionRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Predictions and accounts live in separate tables so an account name can
/// never be mistaken for a prediction subject.
#[derive(Clone)]
pub enum Store {
    Postgres(PgPool),
    Memory(Arc<Mutex<MemoryTables>>),
}

#[derive(Debug, Default)]
pub struct MemoryTables {
    predictions: Vec<PredictionRecord>,
    accounts: HashMap<String, Account>,
}

fn log_db_error(e: &sqlx::Error) {
    if let Some(db_err) = e.as_database_error() {
        tracing::error!("❌ DB query failed: {}", db_err.message());

        if let Some(code) = db_err.code() {
            tracing::info!("ℹ️ SQLSTATE code: {}", code);
        }

        if let Some(constraint) = db_err.constraint() {
            tracing::info!("🔒 Constraint violated: {}", constraint);
        }
    } else {
        tracing::error!("❌ Unknown DB error: {}", e);
    }
}

impl Store {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Store::Postgres(pool))
    }

    pub fn in_memory() -> Self {
        Store::Memory(Arc::new(Mutex::new(MemoryTables::default())))
    }

    fn tables(tables: &Mutex<MemoryTables>) -> Result<std::sync::MutexGuard<'_, MemoryTables>, StoreError> {
        tables.lock().map_err(|_| StoreError::LockPoisoned)
    }

    pub async fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        match self {
            Store::Postgres(pool) => {
                sqlx::query(
                    "INSERT INTO predictions (id, name, symptoms, age, gender, severity, recommendation, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                )
                .bind(record.id)
                .bind(&record.name)
                .bind(record.symptoms.to_vec())
                .bind(i64::from(record.age))
                .bind(record.gender.as_str())
                .bind(i16::from(record.severity.code()))
                .bind(&record.recommendation)
                .bind(record.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    log_db_error(&e);
                    StoreError::Database(e)
                })?;
            }
            Store::Memory(tables) => {
                Self::tables(tables)?.predictions.push(record.clone());
            }
        }
        Ok(())
    }

    pub async fn find_account(&self, username: &str) -> Result<Option<Account>, StoreError> {
        match self {
            Store::Postgres(pool) => {
                let account = sqlx::query_as::<_, Account>(
                    "SELECT username, password_hash, created_at FROM accounts WHERE username = $1",
                )
                .bind(username)
                .fetch_optional(pool)
                .await
                .map_err(|e| {
                    log_db_error(&e);
                    StoreError::Database(e)
                })?;
                Ok(account)
            }
            Store::Memory(tables) => {
                let tables = Self::tables(tables)?;
                Ok(tables.accounts.get(username).cloned())
            }
        }
    }

    pub async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        match self {
            Store::Postgres(pool) => {
                sqlx::query(
                    "INSERT INTO accounts (username, password_hash, created_at) VALUES ($1, $2, $3)",
                )
                .bind(&account.username)
                .bind(&account.password_hash)
                .bind(account.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    let duplicate = e
                        .as_database_error()
                        .is_some_and(|db_err| db_err.is_unique_violation());
                    if duplicate {
                        StoreError::DuplicateUsername(account.username.clone())
                    } else {
                        log_db_error(&e);
                        StoreError::Database(e)
                    }
                })?;
            }
            Store::Memory(tables) => {
                let mut tables = Self::tables(tables)?;
                if tables.accounts.contains_key(&account.username) {
                    return Err(StoreError::DuplicateUsername(account.username.clone()));
                }
                tables.accounts.insert(account.username.clone(), account.clone());
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn memory_predictions(&self) -> Vec<PredictionRecord> {
        match self {
            Store::Memory(tables) => tables.lock().map(|t| t.predictions.clone()).unwrap_or_default(),
            Store::Postgres(_) => Vec::new(),
        }
    }
}
