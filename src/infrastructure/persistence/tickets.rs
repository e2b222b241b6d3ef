use crate::domain::entities::Ticket;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::TicketRepository;
use crate::infrastructure::persistence::{format_timestamp, nullable_text, parse_timestamp, Database};
use chrono::{DateTime, Utc};
use sqlx::{any::AnyRow, Row};

const TICKET_SELECT: &str = "SELECT t.id, t.subject, t.user_id, t.category_id, t.priority,
        t.status, t.agent_id, t.sla_id, t.created_at, t.completed_at,
        (SELECT COUNT(*) FROM ticket_comments c WHERE c.ticket_id = t.id) AS comment_count
     FROM tickets t";

fn row_to_ticket(row: &AnyRow) -> DomainResult<Ticket> {
    let created_at: String = row.try_get("created_at")?;
    let completed_at = nullable_text(row, "completed_at");
    let comment_count: i64 = row.try_get("comment_count")?;

    Ok(Ticket {
        id: row.try_get("id")?,
        subject: row.try_get("subject")?,
        user_id: row.try_get("user_id")?,
        category_id: row.try_get("category_id")?,
        priority: row.try_get("priority")?,
        status: row.try_get("status")?,
        agent_id: nullable_text(row, "agent_id"),
        sla_id: nullable_text(row, "sla_id"),
        comment_count: u32::try_from(comment_count).unwrap_or(u32::MAX),
        created_at: parse_timestamp(&created_at)?,
        completed_at: completed_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

impl Database {
    /// Tickets matching `filter`, oldest first. Ordering happens after
    /// parsing since stored timestamps may mix formats and offsets.
    async fn fetch_tickets(&self, filter: &str, binds: &[&str]) -> DomainResult<Vec<Ticket>> {
        let sql = format!("{} {}", TICKET_SELECT, filter);
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(*value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        let mut tickets = rows.iter().map(row_to_ticket).collect::<DomainResult<Vec<_>>>()?;
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tickets)
    }

    pub async fn create_ticket(&self, ticket: &Ticket) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO tickets (id, subject, user_id, category_id, priority, status,
                agent_id, sla_id, created_at, completed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&ticket.id)
        .bind(&ticket.subject)
        .bind(&ticket.user_id)
        .bind(&ticket.category_id)
        .bind(&ticket.priority)
        .bind(&ticket.status)
        .bind(ticket.agent_id.clone())
        .bind(ticket.sla_id.clone())
        .bind(format_timestamp(&ticket.created_at))
        .bind(ticket.completed_at.as_ref().map(format_timestamp))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record that a comment was posted on a ticket.
    pub async fn record_comment(&self, ticket_id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        sqlx::query("INSERT INTO ticket_comments (id, ticket_id, created_at) VALUES (?, ?, ?)")
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(ticket_id)
            .bind(format_timestamp(&at))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_ticket_status(&self, ticket_id: &str, status: &str) -> DomainResult<()> {
        let result = sqlx::query("UPDATE tickets SET status = ? WHERE id = ?")
            .bind(status)
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Ticket not found: {}", ticket_id)));
        }
        Ok(())
    }

    pub async fn complete_ticket(&self, ticket_id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let result = sqlx::query("UPDATE tickets SET completed_at = ? WHERE id = ?")
            .bind(format_timestamp(&at))
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Ticket not found: {}", ticket_id)));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TicketRepository for Database {
    async fn get_ticket(&self, ticket_id: &str) -> DomainResult<Option<Ticket>> {
        let sql = format!("{} WHERE t.id = ?", TICKET_SELECT);
        let row = sqlx::query(&sql)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_ticket).transpose()
    }

    async fn list_active_tickets(&self) -> DomainResult<Vec<Ticket>> {
        self.fetch_tickets("WHERE t.completed_at IS NULL", &[]).await
    }

    async fn list_complete_tickets(&self) -> DomainResult<Vec<Ticket>> {
        self.fetch_tickets("WHERE t.completed_at IS NOT NULL", &[]).await
    }

    async fn list_user_tickets(&self, user_id: &str) -> DomainResult<Vec<Ticket>> {
        self.fetch_tickets("WHERE t.user_id = ?", &[user_id]).await
    }

    async fn list_agent_tickets(&self, agent_id: &str) -> DomainResult<Vec<Ticket>> {
        self.fetch_tickets("WHERE t.agent_id = ?", &[agent_id]).await
    }

    async fn list_agent_user_tickets(&self, id: &str) -> DomainResult<Vec<Ticket>> {
        self.fetch_tickets("WHERE (t.agent_id = ? OR t.user_id = ?)", &[id, id])
            .await
    }

    async fn update_ticket_agent(&self, ticket_id: &str, agent_id: &str) -> DomainResult<()> {
        let result = sqlx::query("UPDATE tickets SET agent_id = ? WHERE id = ?")
            .bind(agent_id)
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Ticket not found: {}", ticket_id)));
        }
        Ok(())
    }
}
