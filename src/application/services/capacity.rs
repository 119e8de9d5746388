use crate::domain::entities::{Agent, AgentLevel, DEFAULT_MAX_CONCURRENCY};

/// Credit given to a level that has no entry in the efficiency table
pub const DEFAULT_EFFICIENCY: f64 = 0.4;
pub const DEFAULT_QUEUE_MULTIPLIER: f64 = 1.5;
/// Size of the hypothetical junior-equivalent overflow team
pub const DEFAULT_OVERFLOW_TEAM_SIZE: u32 = 6;
/// Chats each overflow agent is sized for, independent of the assignment limit
pub const OVERFLOW_AGENT_CONCURRENCY: u32 = 10;
const OVERFLOW_AGENT_EFFICIENCY: f64 = 0.4;

/// Fraction of an agent's nominal concurrency credited as effective capacity, per level.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyTable {
    entries: Vec<(AgentLevel, f64)>,
}

impl Default for EfficiencyTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (AgentLevel::Junior, 0.4),
                (AgentLevel::MidLevel, 0.6),
                (AgentLevel::Senior, 0.8),
                (AgentLevel::TeamLead, 0.5),
            ],
        }
    }
}

impl EfficiencyTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set (or replace) the multiplier for `level`.
    pub fn with(mut self, level: AgentLevel, multiplier: f64) -> Self {
        match self.entries.iter_mut().find(|(l, _)| *l == level) {
            Some(entry) => entry.1 = multiplier,
            None => self.entries.push((level, multiplier)),
        }
        self
    }

    pub fn efficiency(&self, level: AgentLevel) -> f64 {
        self.entries
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(DEFAULT_EFFICIENCY)
    }
}

/// Converts rosters into queue sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityPolicy {
    pub efficiency: EfficiencyTable,
    pub queue_multiplier: f64,
    /// Per-agent chat limit used by assignment
    pub nominal_concurrency: u32,
    pub overflow_team_size: u32,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            efficiency: EfficiencyTable::default(),
            queue_multiplier: DEFAULT_QUEUE_MULTIPLIER,
            nominal_concurrency: DEFAULT_MAX_CONCURRENCY,
            overflow_team_size: DEFAULT_OVERFLOW_TEAM_SIZE,
        }
    }
}

impl CapacityPolicy {
    /// `floor(sum(max_concurrency * efficiency(level)))` over the given agents.
    pub fn team_capacity(&self, agents: &[Agent]) -> u32 {
        let capacity: f64 = agents
            .iter()
            .map(|agent| f64::from(agent.max_concurrency) * self.efficiency.efficiency(agent.level))
            .sum();
        capacity.floor() as u32
    }

    /// Reserve capacity of the overflow team. Fixed; never derived from the live roster
    /// or the assignment limit.
    pub fn overflow_capacity(&self) -> u32 {
        (f64::from(OVERFLOW_AGENT_CONCURRENCY)
            * OVERFLOW_AGENT_EFFICIENCY
            * f64::from(self.overflow_team_size))
        .floor() as u32
    }

    /// Number of sessions the queue may hold for a given team capacity.
    pub fn queue_limit(&self, team_capacity: u32) -> u32 {
        (f64::from(team_capacity) * self.queue_multiplier).floor() as u32
    }
}

pub fn team_capacity(agents: &[Agent]) -> u32 {
    CapacityPolicy::default().team_capacity(agents)
}

pub fn overflow_capacity() -> u32 {
    CapacityPolicy::default().overflow_capacity()
}
