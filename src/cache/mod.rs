use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with optional TTL (in seconds)
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Delete multiple keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> redis::RedisResult<()> {
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.connection.clone())
            .await?;

        if !keys.is_empty() {
            let _: () = redis::cmd("DEL")
                .arg(&keys)
                .query_async(&mut self.connection.clone())
                .await?;
        }

        Ok(())
    }
}

/// Cache key generators
pub mod keys {
    use uuid::Uuid;

    /// Key for a single user profile
    pub fn user(id: &str) -> String {
        format!("user:{}", id)
    }

    /// Key for one page of the open-project listing
    pub fn open_projects(page: u64, limit: u64) -> String {
        format!("projects:open:{}:{}", page, limit)
    }

    /// Key for one page of a project's match list
    pub fn project_matches(project_id: Uuid, min_score: i32, page: u64, limit: u64) -> String {
        format!("matches:project:{}:{}:{}:{}", project_id, min_score, page, limit)
    }

    /// Invalidation pattern for every cached page of a project's matches
    pub fn project_matches_pattern(project_id: Uuid) -> String {
        format!("matches:project:{}:*", project_id)
    }

    /// Key for one page of a freelancer's match list
    pub fn freelancer_matches(user_id: Uuid, min_score: i32, page: u64, limit: u64) -> String {
        format!("matches:freelancer:{}:{}:{}:{}", user_id, min_score, page, limit)
    }

    /// Invalidation pattern for every cached page of a freelancer's matches
    pub fn freelancer_matches_pattern(user_id: Uuid) -> String {
        format!("matches:freelancer:{}:*", user_id)
    }
}

/// Cache TTLs in seconds
pub mod ttl {
    /// Open-project listings change often
    pub const PROJECT_LIST: u64 = 60;
    /// Match lists are recomputed on demand, so short-lived
    pub const MATCH_LIST: u64 = 300;
    /// User profiles
    pub const USER: u64 = 900;
}

/// Wrapper type for Actix-web app data
pub type CacheData = Arc<RedisCache>;
