//! In-memory store shared by the service unit tests.

use crate::domain::entities::{Agent, AgentStatus, ChatSession, ChatStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{
    agent_repository::AgentRepository, assignment_repository::AssignmentRepository,
    chat_session_repository::ChatSessionRepository,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct InMemoryStore {
    agents: Mutex<Vec<Agent>>,
    sessions: Mutex<Vec<ChatSession>>,
    fail_next_write: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn with_agents(agents: Vec<Agent>) -> Arc<Self> {
        let store = Self::default();
        *store.agents.lock().unwrap() = agents;
        Arc::new(store)
    }

    pub fn insert_session(&self, session: ChatSession) {
        self.sessions.lock().unwrap().push(session);
    }

    pub fn seed_queued(&self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| {
                let session = ChatSession::new();
                let id = session.id.clone();
                self.insert_session(session);
                id
            })
            .collect()
    }

    pub fn queued_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == ChatStatus::Queued)
            .count()
    }

    pub fn session(&self, id: &str) -> Option<ChatSession> {
        self.sessions.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }

    pub fn agent(&self, id: &str) -> Option<Agent> {
        self.agents.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }

    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn begin_write(&self) -> DomainResult<()> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Internal("simulated store failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn check_session_version(sessions: &[ChatSession], session: &ChatSession) -> DomainResult<usize> {
        let index = sessions
            .iter()
            .position(|s| s.id == session.id)
            .ok_or_else(|| DomainError::NotFound(format!("Chat session {} not found", session.id)))?;
        if sessions[index].version != session.version {
            return Err(DomainError::Conflict(format!(
                "Chat session {} was modified concurrently",
                session.id
            )));
        }
        Ok(index)
    }

    fn check_agent_version(agents: &[Agent], agent: &Agent) -> DomainResult<usize> {
        let index = agents
            .iter()
            .position(|a| a.id == agent.id)
            .ok_or_else(|| DomainError::NotFound(format!("Agent {} not found", agent.id)))?;
        if agents[index].version != agent.version {
            return Err(DomainError::Conflict(format!(
                "Agent {} was modified concurrently",
                agent.id
            )));
        }
        Ok(index)
    }
}

#[async_trait]
impl AgentRepository for InMemoryStore {
    async fn fetch_available_agents(&self) -> DomainResult<Vec<Agent>> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == AgentStatus::Available)
            .cloned()
            .collect())
    }

    async fn fetch_agents_by_shift(&self, shift_number: u32) -> DomainResult<Vec<Agent>> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.shift_number == shift_number)
            .cloned()
            .collect())
    }

    async fn get_agent_by_id(&self, agent_id: &str) -> DomainResult<Option<Agent>> {
        Ok(self.agent(agent_id))
    }

    async fn create_agent(&self, agent: &Agent) -> DomainResult<()> {
        self.begin_write()?;
        self.agents.lock().unwrap().push(agent.clone());
        Ok(())
    }

    async fn update_agent(&self, agent: &Agent) -> DomainResult<()> {
        self.begin_write()?;
        let mut agents = self.agents.lock().unwrap();
        let index = Self::check_agent_version(&agents, agent)?;
        agents[index] = Agent {
            version: agent.version + 1,
            ..agent.clone()
        };
        Ok(())
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryStore {
    async fn fetch_queued_sessions(&self) -> DomainResult<Vec<ChatSession>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == ChatStatus::Queued)
            .cloned()
            .collect())
    }

    async fn create_session(&self, session: &ChatSession) -> DomainResult<()> {
        self.begin_write()?;
        self.insert_session(session.clone());
        Ok(())
    }

    async fn update_session(&self, session: &ChatSession) -> DomainResult<()> {
        self.begin_write()?;
        let mut sessions = self.sessions.lock().unwrap();
        let index = Self::check_session_version(&sessions, session)?;
        sessions[index] = ChatSession {
            version: session.version + 1,
            ..session.clone()
        };
        Ok(())
    }

    async fn fetch_session_by_id(&self, session_id: &str) -> DomainResult<Option<ChatSession>> {
        Ok(self.session(session_id))
    }

    async fn count_active_sessions_for_agent(&self, agent_id: &str) -> DomainResult<u32> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                s.status == ChatStatus::Active && s.assigned_agent_id.as_deref() == Some(agent_id)
            })
            .count() as u32)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn commit_assignment(&self, session: &ChatSession, agent: &Agent) -> DomainResult<()> {
        self.begin_write()?;
        let mut sessions = self.sessions.lock().unwrap();
        let mut agents = self.agents.lock().unwrap();
        let session_index = Self::check_session_version(&sessions, session)?;
        let agent_index = Self::check_agent_version(&agents, agent)?;

        sessions[session_index] = ChatSession {
            version: session.version + 1,
            ..session.clone()
        };
        agents[agent_index] = Agent {
            version: agent.version + 1,
            ..agent.clone()
        };
        Ok(())
    }
}
