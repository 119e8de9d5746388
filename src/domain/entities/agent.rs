use serde::{Deserialize, Serialize};
use std::fmt;

/// Nominal number of chats an agent handles at once.
pub const DEFAULT_MAX_CONCURRENCY: u32 = 10;

/// Seniority tier. Variant order is the assignment order (Junior first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLevel {
    Junior,
    MidLevel,
    Senior,
    TeamLead,
}

impl AgentLevel {
    pub const ALL: [AgentLevel; 4] = [
        AgentLevel::Junior,
        AgentLevel::MidLevel,
        AgentLevel::Senior,
        AgentLevel::TeamLead,
    ];
}

impl fmt::Display for AgentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentLevel::Junior => write!(f, "junior"),
            AgentLevel::MidLevel => write!(f, "mid_level"),
            AgentLevel::Senior => write!(f, "senior"),
            AgentLevel::TeamLead => write!(f, "team_lead"),
        }
    }
}

impl std::str::FromStr for AgentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junior" => Ok(AgentLevel::Junior),
            "mid_level" | "midlevel" => Ok(AgentLevel::MidLevel),
            "senior" => Ok(AgentLevel::Senior),
            "team_lead" | "teamlead" => Ok(AgentLevel::TeamLead),
            _ => Err(format!("Invalid agent level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Available,
    Busy,
    Offline,
}

impl Default for AgentStatus {
    fn default() -> Self {
        AgentStatus::Offline
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Available => write!(f, "available"),
            AgentStatus::Busy => write!(f, "busy"),
            AgentStatus::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(AgentStatus::Available),
            "busy" => Ok(AgentStatus::Busy),
            "offline" => Ok(AgentStatus::Offline),
            _ => Err(format!("Invalid agent status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub level: AgentLevel,
    pub max_concurrency: u32,
    pub current_chats: u32,
    pub shift_number: u32,
    pub status: AgentStatus,
    /// Optimistic concurrency token, bumped by the store on every update
    pub version: i64,
}

impl Agent {
    pub fn new(name: String, level: AgentLevel, shift_number: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            level,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            current_chats: 0,
            shift_number,
            status: AgentStatus::Available,
            version: 0,
        }
    }

    /// Whether another chat fits under `limit`, never exceeding the agent's own maximum.
    pub fn has_capacity_within(&self, limit: u32) -> bool {
        self.current_chats < limit.min(self.max_concurrency)
    }
}
