//! PostgreSQL document adapter for ProfileStore
//!
//! Each profile is one row in `financial_profiles`; the four mutable fields
//! are JSONB documents. Upsert is a single `INSERT ... ON CONFLICT` statement,
//! so existence check and write cannot interleave with another writer.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::finance::{FinancialProfile, ProfileData};
use crate::domain::foundation::{DomainError, Username};
use crate::ports::{ProfileStore, UpsertOutcome};

const SELECT_PROFILE: &str = r#"
    SELECT user_details, income, debt, expenses
    FROM financial_profiles
    WHERE username = $1
"#;

// `xmax = 0` holds only for a freshly inserted tuple.
const UPSERT_PROFILE: &str = r#"
    INSERT INTO financial_profiles (username, user_details, income, debt, expenses)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (username) DO UPDATE
    SET user_details = EXCLUDED.user_details,
        income = EXCLUDED.income,
        debt = EXCLUDED.debt,
        expenses = EXCLUDED.expenses,
        updated_at = NOW()
    RETURNING (xmax = 0) AS inserted
"#;

/// PostgreSQL implementation of ProfileStore
#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections`, waiting up to
    /// `acquire_timeout` for each connection.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(db_error)?;

        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations.
    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Migration failed: {}", e)))
    }

    fn from_db_row(username: &Username, row: &PgRow) -> Result<FinancialProfile, DomainError> {
        let data = document_from_columns(
            row.try_get("user_details").map_err(db_error)?,
            row.try_get("income").map_err(db_error)?,
            row.try_get("debt").map_err(db_error)?,
            row.try_get("expenses").map_err(db_error)?,
        )?;
        Ok(FinancialProfile::from_data(username.clone(), data))
    }
}

/// Reassemble the stored columns into one lenient document.
fn document_from_columns(
    user_details: Value,
    income: Value,
    debt: Value,
    expenses: Value,
) -> Result<ProfileData, DomainError> {
    let document = json!({
        "userDetails": user_details,
        "income": income,
        "debt": debt,
        "expenses": expenses,
    });
    Ok(serde_json::from_value(document)?)
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Database error: {}", e))
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, username: &Username) -> Result<Option<FinancialProfile>, DomainError> {
        tracing::debug!(username = %username, "loading profile from postgres");

        let row = sqlx::query(SELECT_PROFILE)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => Ok(Some(Self::from_db_row(username, &row)?)),
            None => Ok(None),
        }
    }

    async fn upsert(
        &self,
        username: &Username,
        data: ProfileData,
    ) -> Result<UpsertOutcome, DomainError> {
        let profile = FinancialProfile::from_data(username.clone(), data);

        let row = sqlx::query(UPSERT_PROFILE)
            .bind(username.as_str())
            .bind(serde_json::to_value(profile.user_details())?)
            .bind(serde_json::to_value(profile.income())?)
            .bind(serde_json::to_value(profile.debt())?)
            .bind(serde_json::to_value(profile.expenses())?)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        let inserted: bool = row.try_get("inserted").map_err(db_error)?;
        tracing::debug!(username = %username, inserted, "upserted profile in postgres");

        Ok(if inserted {
            UpsertOutcome::created(profile)
        } else {
            UpsertOutcome::replaced(profile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::finance::IncomeEntry;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn columns_reassemble_into_profile_data() {
        let data = document_from_columns(
            json!({"username": "alice", "password": ""}),
            json!([{"title": "Job", "amount": 5000}]),
            json!([]),
            json!({"needs": [], "wants": []}),
        )
        .unwrap();

        assert_eq!(data.user_details.username, "alice");
        assert_eq!(data.income, vec![IncomeEntry::new("Job", 5000.0)]);
    }

    #[test]
    fn null_columns_default() {
        let data =
            document_from_columns(Value::Null, Value::Null, Value::Null, Value::Null).unwrap();
        assert_eq!(data, ProfileData::default());
    }

    #[test]
    fn corrupt_column_is_a_serialization_fault() {
        let err = document_from_columns(Value::Null, json!("not a list"), Value::Null, Value::Null)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SerializationError);
        assert!(err.is_storage_fault());
    }

    // Requires a running PostgreSQL instance:
    // FINANCE_TRACKER_TEST_DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn upsert_round_trip_against_live_database() {
        let url = std::env::var("FINANCE_TRACKER_TEST_DATABASE_URL")
            .expect("FINANCE_TRACKER_TEST_DATABASE_URL must be set");
        let store = PgProfileStore::connect(&url, 2, Duration::from_secs(5)).await.unwrap();
        store.run_migrations().await.unwrap();

        let username = Username::new(format!("it-{}", std::process::id())).unwrap();
        let data = ProfileData {
            income: vec![IncomeEntry::new("Job", 42.0)],
            ..Default::default()
        };

        let first = store.upsert(&username, data.clone()).await.unwrap();
        let second = store.upsert(&username, ProfileData::default()).await.unwrap();
        let stored = store.get(&username).await.unwrap().unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert!(stored.income().is_empty());
    }
}
