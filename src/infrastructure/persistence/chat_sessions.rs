use crate::domain::entities::{ChatSession, ChatStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::chat_session_repository::ChatSessionRepository;
use crate::infrastructure::persistence::{
    classify_missed_update, format_timestamp, parse_timestamp, to_count, Database,
};
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

const SESSION_COLUMNS: &str =
    "id, assigned_agent_id, is_active, status, created_at, poll_count, last_poll_at, version";

pub(crate) fn session_from_row(row: &AnyRow) -> DomainResult<ChatSession> {
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    // The Any driver refuses to decode NULL into Option<String>
    let last_poll_at = row
        .try_get::<Option<String>, _>("last_poll_at")
        .ok()
        .flatten();
    let is_active: i64 = row.try_get("is_active")?;

    Ok(ChatSession {
        id: row.try_get("id")?,
        assigned_agent_id: row
            .try_get::<Option<String>, _>("assigned_agent_id")
            .ok()
            .flatten(),
        is_active: is_active != 0,
        status: status.parse::<ChatStatus>().map_err(DomainError::Internal)?,
        created_at: parse_timestamp(&created_at)?,
        poll_count: to_count(row.try_get("poll_count")?, "poll_count")?,
        last_poll_at: last_poll_at.as_deref().map(parse_timestamp).transpose()?,
        version: row.try_get("version")?,
    })
}

/// Versioned write of the mutable session columns; zero rows means the version was stale.
pub(crate) async fn write_session<'e, E>(
    executor: E,
    session: &ChatSession,
) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Any>,
{
    let result = sqlx::query(
        "UPDATE chat_sessions
         SET assigned_agent_id = ?, is_active = ?, status = ?, poll_count = ?,
             last_poll_at = ?, version = version + 1
         WHERE id = ? AND version = ?",
    )
    .bind(session.assigned_agent_id.clone())
    .bind(i64::from(session.is_active))
    .bind(session.status.to_string())
    .bind(i64::from(session.poll_count))
    .bind(session.last_poll_at.as_ref().map(format_timestamp))
    .bind(session.id.clone())
    .bind(session.version)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

#[async_trait]
impl ChatSessionRepository for Database {
    async fn fetch_queued_sessions(&self) -> DomainResult<Vec<ChatSession>> {
        let query = format!(
            "SELECT {} FROM chat_sessions WHERE status = 'queued' ORDER BY created_at, rowid",
            SESSION_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(session_from_row).collect()
    }

    async fn create_session(&self, session: &ChatSession) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO chat_sessions
                (id, assigned_agent_id, is_active, status, created_at, poll_count, last_poll_at, version)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.assigned_agent_id)
        .bind(i64::from(session.is_active))
        .bind(session.status.to_string())
        .bind(format_timestamp(&session.created_at))
        .bind(i64::from(session.poll_count))
        .bind(session.last_poll_at.as_ref().map(format_timestamp))
        .bind(session.version)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_session(&self, session: &ChatSession) -> DomainResult<()> {
        if write_session(&self.pool, session).await? == 0 {
            return Err(classify_missed_update(&self.pool, "chat_sessions", &session.id).await);
        }
        Ok(())
    }

    async fn fetch_session_by_id(&self, session_id: &str) -> DomainResult<Option<ChatSession>> {
        let query = format!("SELECT {} FROM chat_sessions WHERE id = ?", SESSION_COLUMNS);
        let row = sqlx::query(&query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn count_active_sessions_for_agent(&self, agent_id: &str) -> DomainResult<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) AS count FROM chat_sessions
             WHERE assigned_agent_id = ? AND status = 'active'",
        )
        .bind(agent_id)
        .fetch_one(&self.pool)
        .await?;

        to_count(count, "active session count")
    }
}
