use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{SessionRecord, SessionStore};
use crate::error::StoreError;

/// 内存会话存储
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StoreError::Unavailable("session map lock poisoned".into()))?;
        sessions.insert(record.id.clone(), record);
        Ok(())
    }
}

impl FromIterator<SessionRecord> for InMemorySessionStore {
    fn from_iter<I: IntoIterator<Item = SessionRecord>>(iter: I) -> Self {
        let sessions = iter.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            sessions: RwLock::new(sessions),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_session(&self, id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StoreError::Unavailable("session map lock poisoned".into()))?;
        Ok(sessions.get(id).cloned())
    }
}
