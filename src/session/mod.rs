// 会话存储
// 只读取会话最后已知位置与认证时间，会话的创建与更新由认证流程负责

mod memory;
mod model;
mod redis_store;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::InMemorySessionStore;
pub use model::{DEMO_SESSION_ID, SessionRecord};
pub use redis_store::RedisSessionStore;

/// 会话查询接口
///
/// 会话不存在时返回 `Ok(None)`，存储不可用时返回 `StoreError`。
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_session(&self, id: &str) -> Result<Option<SessionRecord>, StoreError>;
}
