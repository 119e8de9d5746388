use crate::domain::entities::{Agent, AgentLevel, AgentStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::agent_repository::AgentRepository;
use crate::infrastructure::persistence::{classify_missed_update, to_count, Database};
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

const AGENT_COLUMNS: &str =
    "id, name, level, max_concurrency, current_chats, shift_number, status, version";

pub(crate) fn agent_from_row(row: &AnyRow) -> DomainResult<Agent> {
    let level: String = row.try_get("level")?;
    let status: String = row.try_get("status")?;

    Ok(Agent {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        level: level.parse::<AgentLevel>().map_err(DomainError::Internal)?,
        max_concurrency: to_count(row.try_get("max_concurrency")?, "max_concurrency")?,
        current_chats: to_count(row.try_get("current_chats")?, "current_chats")?,
        shift_number: to_count(row.try_get("shift_number")?, "shift_number")?,
        status: status.parse::<AgentStatus>().map_err(DomainError::Internal)?,
        version: row.try_get("version")?,
    })
}

/// Versioned write of every mutable agent column. Returns the affected row count,
/// which is zero when `agent.version` no longer matches.
pub(crate) async fn write_agent<'e, E>(executor: E, agent: &Agent) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Any>,
{
    let result = sqlx::query(
        "UPDATE agents
         SET name = ?, level = ?, max_concurrency = ?, current_chats = ?,
             shift_number = ?, status = ?, version = version + 1
         WHERE id = ? AND version = ?",
    )
    .bind(agent.name.clone())
    .bind(agent.level.to_string())
    .bind(i64::from(agent.max_concurrency))
    .bind(i64::from(agent.current_chats))
    .bind(i64::from(agent.shift_number))
    .bind(agent.status.to_string())
    .bind(agent.id.clone())
    .bind(agent.version)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

#[async_trait]
impl AgentRepository for Database {
    async fn fetch_available_agents(&self) -> DomainResult<Vec<Agent>> {
        let query = format!(
            "SELECT {} FROM agents WHERE status = 'available' ORDER BY rowid",
            AGENT_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(agent_from_row).collect()
    }

    async fn fetch_agents_by_shift(&self, shift_number: u32) -> DomainResult<Vec<Agent>> {
        let query = format!(
            "SELECT {} FROM agents WHERE shift_number = ? ORDER BY rowid",
            AGENT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(i64::from(shift_number))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(agent_from_row).collect()
    }

    async fn get_agent_by_id(&self, agent_id: &str) -> DomainResult<Option<Agent>> {
        let query = format!("SELECT {} FROM agents WHERE id = ?", AGENT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(agent_from_row).transpose()
    }

    async fn create_agent(&self, agent: &Agent) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO agents (id, name, level, max_concurrency, current_chats, shift_number, status, version)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&agent.id)
        .bind(&agent.name)
        .bind(agent.level.to_string())
        .bind(i64::from(agent.max_concurrency))
        .bind(i64::from(agent.current_chats))
        .bind(i64::from(agent.shift_number))
        .bind(agent.status.to_string())
        .bind(agent.version)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_agent(&self, agent: &Agent) -> DomainResult<()> {
        if write_agent(&self.pool, agent).await? == 0 {
            return Err(classify_missed_update(&self.pool, "agents", &agent.id).await);
        }
        Ok(())
    }
}
