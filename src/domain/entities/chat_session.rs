use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    Queued,
    Active,
    Closed,
}

impl fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatStatus::Queued => write!(f, "queued"),
            ChatStatus::Active => write!(f, "active"),
            ChatStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for ChatStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(ChatStatus::Queued),
            "active" => Ok(ChatStatus::Active),
            "closed" => Ok(ChatStatus::Closed),
            _ => Err(format!("Invalid chat status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    /// Only meaningful once the session has left `Queued`
    pub assigned_agent_id: Option<String>,
    pub is_active: bool,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
    pub poll_count: u32,
    pub last_poll_at: Option<DateTime<Utc>>,
    pub version: i64,
}

impl ChatSession {
    /// A fresh, unassigned session waiting in the queue.
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(id: String) -> Self {
        Self {
            id,
            assigned_agent_id: None,
            is_active: true,
            status: ChatStatus::Queued,
            created_at: Utc::now(),
            poll_count: 0,
            last_poll_at: None,
            version: 0,
        }
    }

    pub fn assign_to(&mut self, agent_id: &str) {
        self.assigned_agent_id = Some(agent_id.to_string());
        self.is_active = true;
        self.status = ChatStatus::Active;
    }

    pub fn record_poll(&mut self, at: DateTime<Utc>) {
        self.poll_count = 0;
        self.last_poll_at = Some(at);
        self.is_active = true;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
