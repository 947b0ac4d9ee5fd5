//! Redis key-value adapter for ProfileStore.
//!
//! Each profile is one hash at `<collection>:<username>` with one field per
//! mutable part (`userDetails`, `income`, `debt`, `expenses`), each holding
//! JSON text. An upsert is a MULTI/EXEC transaction of `EXISTS` followed by
//! `HSET` of every field, so the created/replaced decision is taken
//! atomically with the write.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::{Map, Value};

use crate::domain::finance::{FinancialProfile, ProfileData};
use crate::domain::foundation::{DomainError, Username};
use crate::ports::{ProfileStore, UpsertOutcome};

const FIELD_USER_DETAILS: &str = "userDetails";
const FIELD_INCOME: &str = "income";
const FIELD_DEBT: &str = "debt";
const FIELD_EXPENSES: &str = "expenses";

const FIELDS: [&str; 4] = [FIELD_USER_DETAILS, FIELD_INCOME, FIELD_DEBT, FIELD_EXPENSES];

/// Redis-backed profile store.
#[derive(Clone)]
pub struct RedisProfileStore {
    conn: MultiplexedConnection,
    collection: String,
}

impl RedisProfileStore {
    pub fn new(conn: MultiplexedConnection, collection: impl Into<String>) -> Self {
        Self {
            conn,
            collection: collection.into(),
        }
    }

    /// Open a multiplexed connection, giving up after `connect_timeout`.
    pub async fn connect(
        url: &str,
        collection: &str,
        connect_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(kv_error)?;
        let conn = tokio::time::timeout(connect_timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| DomainError::key_value_store("Timed out connecting to Redis"))?
            .map_err(kv_error)?;

        Ok(Self::new(conn, collection))
    }

    fn key(&self, username: &Username) -> String {
        profile_key(&self.collection, username)
    }
}

fn profile_key(collection: &str, username: &Username) -> String {
    format!("{}:{}", collection, username.as_str())
}

fn kv_error(e: redis::RedisError) -> DomainError {
    DomainError::key_value_store(format!("Redis error: {}", e))
}

/// Serialize every mutable field; all four are always written.
fn encode_fields(profile: &FinancialProfile) -> Result<Vec<(&'static str, String)>, DomainError> {
    Ok(vec![
        (FIELD_USER_DETAILS, serde_json::to_string(profile.user_details())?),
        (FIELD_INCOME, serde_json::to_string(profile.income())?),
        (FIELD_DEBT, serde_json::to_string(profile.debt())?),
        (FIELD_EXPENSES, serde_json::to_string(profile.expenses())?),
    ])
}

/// Missing hash fields take their defaults.
fn decode_fields(fields: &HashMap<String, String>) -> Result<ProfileData, DomainError> {
    let mut document = Map::new();
    for name in FIELDS {
        if let Some(raw) = fields.get(name) {
            document.insert(name.to_string(), serde_json::from_str::<Value>(raw)?);
        }
    }
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[async_trait]
impl ProfileStore for RedisProfileStore {
    async fn get(&self, username: &Username) -> Result<Option<FinancialProfile>, DomainError> {
        let key = self.key(username);
        let mut conn = self.conn.clone();

        let fields: HashMap<String, String> = conn.hgetall(&key).await.map_err(kv_error)?;
        tracing::debug!(key = %key, fields = fields.len(), "loaded profile hash");

        if fields.is_empty() {
            return Ok(None);
        }

        let data = decode_fields(&fields)?;
        Ok(Some(FinancialProfile::from_data(username.clone(), data)))
    }

    async fn upsert(
        &self,
        username: &Username,
        data: ProfileData,
    ) -> Result<UpsertOutcome, DomainError> {
        let key = self.key(username);
        let profile = FinancialProfile::from_data(username.clone(), data);
        let fields = encode_fields(&profile)?;
        let mut conn = self.conn.clone();

        let (existed, ()): (bool, ()) = redis::pipe()
            .atomic()
            .exists(&key)
            .hset_multiple(&key, &fields[..])
            .query_async(&mut conn)
            .await
            .map_err(kv_error)?;

        tracing::debug!(key = %key, existed, "wrote profile hash");

        Ok(if existed {
            UpsertOutcome::replaced(profile)
        } else {
            UpsertOutcome::created(profile)
        })
    }
}

impl std::fmt::Debug for RedisProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisProfileStore")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}
