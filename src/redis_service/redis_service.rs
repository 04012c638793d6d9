use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

pub async fn init_redis_connection(redis_url: &str) -> Result<ConnectionManager> {
    let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;
    let mut conn = client
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")?;

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .context("Failed to ping Redis")?;

    Ok(conn)
}

/// Revoked session tokens, kept until the token would have expired anyway.
#[derive(Clone)]
pub struct JwtBlacklist {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Redis(ConnectionManager),
    Local(Arc<Mutex<HashMap<String, i64>>>),
}

fn blacklist_key(user_id: &str, jwt: &str) -> String {
    format!("jwt:blacklist:{}:{}", user_id, jwt)
}

impl JwtBlacklist {
    pub fn redis(conn: ConnectionManager) -> Self {
        Self {
            backend: Backend::Redis(conn),
        }
    }

    /// Single-process blacklist, lost on restart.
    pub fn local() -> Self {
        Self {
            backend: Backend::Local(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    pub async fn add_jwt_to_blacklist(&self, user_id: &str, jwt: &str, expires_at: i64) -> Result<()> {
        let key = blacklist_key(user_id, jwt);
        let now = Utc::now().timestamp();
        let ttl = (expires_at - now).max(1) as u64;

        match &self.backend {
            Backend::Redis(conn) => {
                let mut redis = conn.clone();
                let _: () = redis.set_ex(&key, now, ttl).await?;
            }
            Backend::Local(entries) => {
                let mut entries = entries
                    .lock()
                    .map_err(|_| anyhow::anyhow!("Token blacklist lock poisoned"))?;
                entries.retain(|_, expiry| *expiry > now);
                entries.insert(key, now + ttl as i64);
            }
        }
        Ok(())
    }

    pub async fn check_jwt_in_blacklist(&self, user_id: &str, jwt: &str) -> Result<bool> {
        let key = blacklist_key(user_id, jwt);

        match &self.backend {
            Backend::Redis(conn) => {
                let mut redis = conn.clone();
                let exists: bool = redis.exists(&key).await?;
                Ok(exists)
            }
            Backend::Local(entries) => {
                let entries = entries
                    .lock()
                    .map_err(|_| anyhow::anyhow!("Token blacklist lock poisoned"))?;
                let now = Utc::now().timestamp();
                Ok(entries.get(&key).is_some_and(|expiry| *expiry > now))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_blacklist_tracks_revoked_tokens() {
        let blacklist = JwtBlacklist::local();
        let expires_at = Utc::now().timestamp() + 600;

        assert!(!blacklist.check_jwt_in_blacklist("u1", "tok").await.unwrap());
        blacklist.add_jwt_to_blacklist("u1", "tok", expires_at).await.unwrap();
        assert!(blacklist.check_jwt_in_blacklist("u1", "tok").await.unwrap());
        assert!(!blacklist.check_jwt_in_blacklist("u2", "tok").await.unwrap());
    }
}
