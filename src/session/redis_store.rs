use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::{SessionRecord, SessionStore};
use crate::error::StoreError;

const SESSION_KEY_PREFIX: &str = "session:";

/// Redis 会话存储，值为 `SessionRecord` 的 JSON
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        let client = RedisClient::open(redis_url)?;
        Ok(Self { client })
    }

    pub fn key(session_id: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, session_id)
    }

    /// 写入会话，ttl 为过期秒数
    pub async fn put_session(&self, record: &SessionRecord, ttl: u64) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(record)?;
        let _: () = conn.set_ex(Self::key(&record.id), json, ttl).await?;

        tracing::debug!("Cached session {} for {}s", record.id, ttl);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_session(&self, id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get(Self::key(id)).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
