use super::KvStore;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Manager, Pool, Runtime};

/// Keys fetched per SCAN round trip when listing
const SCAN_BATCH: usize = 100;

/// Redis-backed store, shared by every instance pointed at the same server
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
    key_prefix: String,
}

impl RedisStore {
    /// Create a new store connection pool
    pub fn new(redis_url: &str, max_connections: u32, key_prefix: String) -> AppResult<Self> {
        let manager = Manager::new(redis_url)
            .map_err(|e| AppError::Configuration(format!("Invalid Redis URL: {}", e)))?;

        let pool = Pool::builder(manager)
            .max_size(max_connections as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self { pool, key_prefix })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

/// Escape the characters `SCAN MATCH` treats as glob syntax
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.pool.get().await?;
        let _: () = conn.set(self.key(key), value).await?;
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;
        // SET NX answers OK when written and nil when the key exists
        let reply: Option<String> = deadpool_redis::redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .arg("NX")
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn entries(&self) -> AppResult<Vec<(String, String)>> {
        let mut conn = self.pool.get().await?;
        let pattern = format!("{}*", escape_glob(&self.key_prefix));

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = deadpool_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<Option<String>> = deadpool_redis::redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        // Keys can disappear between SCAN and MGET
        Ok(keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| {
                let code = key.strip_prefix(&self.key_prefix)?.to_string();
                value.map(|value| (code, value))
            })
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}
