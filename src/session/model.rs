use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// 演示会话ID（洛杉矶）
pub const DEMO_SESSION_ID: &str = "65dea6f4-5d15-4e61-9eb7-f30190c0b2e2";

/// 会话记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub active: bool,
    pub issued_at: DateTime<Utc>,
    pub authenticated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_known_location: Coordinate,
}

impl SessionRecord {
    /// 两小时前在洛杉矶完成认证、八小时后过期的会话
    pub fn demo(now: DateTime<Utc>) -> Self {
        let authenticated_at = now - TimeDelta::hours(2);
        Self {
            id: DEMO_SESSION_ID.to_string(),
            active: true,
            issued_at: authenticated_at,
            authenticated_at,
            expires_at: now + TimeDelta::hours(8),
            last_known_location: Coordinate {
                latitude: 34.026437,
                longitude: -118.26109,
            },
        }
    }

    /// 距离过期的剩余时间，已过期返回 None
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let remaining = self.expires_at - now;
        (remaining > TimeDelta::zero()).then_some(remaining)
    }
}
