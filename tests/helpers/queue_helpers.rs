use chatdesk::domain::ports::{
    agent_repository::AgentRepository, chat_session_repository::ChatSessionRepository,
};
use chatdesk::infrastructure::persistence::Database;
use chatdesk::{Agent, AgentLevel, AgentStatus, ChatSession};

/// Insert an available agent with the given level and load
pub async fn create_test_agent(
    db: &Database,
    name: &str,
    level: AgentLevel,
    current_chats: u32,
) -> Agent {
    let mut agent = Agent::new(name.to_string(), level, 1);
    agent.current_chats = current_chats;
    db.create_agent(&agent)
        .await
        .expect("Failed to create test agent");
    agent
}

pub async fn create_agent_with_status(
    db: &Database,
    name: &str,
    level: AgentLevel,
    status: AgentStatus,
) -> Agent {
    let mut agent = Agent::new(name.to_string(), level, 1);
    agent.status = status;
    db.create_agent(&agent)
        .await
        .expect("Failed to create test agent");
    agent
}

pub async fn create_agent_on_shift(
    db: &Database,
    name: &str,
    shift_number: u32,
    status: AgentStatus,
) -> Agent {
    let mut agent = Agent::new(name.to_string(), AgentLevel::Junior, shift_number);
    agent.status = status;
    db.create_agent(&agent)
        .await
        .expect("Failed to create test agent");
    agent
}

/// Insert `count` queued sessions directly, bypassing admission
pub async fn seed_queued_sessions(db: &Database, count: usize) -> Vec<ChatSession> {
    let mut sessions = Vec::with_capacity(count);
    for _ in 0..count {
        let session = ChatSession::new();
        db.create_session(&session)
            .await
            .expect("Failed to create queued session");
        sessions.push(session);
    }
    sessions
}

pub async fn create_session_with_polls(db: &Database, poll_count: u32) -> ChatSession {
    let mut session = ChatSession::new();
    session.poll_count = poll_count;
    db.create_session(&session)
        .await
        .expect("Failed to create session");
    session
}

pub async fn load_session(db: &Database, id: &str) -> ChatSession {
    db.fetch_session_by_id(id)
        .await
        .expect("Failed to load session")
        .expect("Session should exist")
}

pub async fn load_agent(db: &Database, id: &str) -> Agent {
    db.get_agent_by_id(id)
        .await
        .expect("Failed to load agent")
        .expect("Agent should exist")
}

pub async fn queued_count(db: &Database) -> usize {
    db.fetch_queued_sessions()
        .await
        .expect("Failed to fetch queued sessions")
        .len()
}
