use crate::domain::entities::{Agent, Category};
use crate::domain::errors::DomainResult;
use crate::domain::ports::CategoryRepository;
use crate::infrastructure::persistence::{nullable_text, Database};
use sqlx::Row;

impl Database {
    pub async fn create_agent(&self, agent: &Agent) -> DomainResult<()> {
        sqlx::query("INSERT INTO agents (id, name, is_admin) VALUES (?, ?, ?)")
            .bind(&agent.id)
            .bind(&agent.name)
            .bind(i64::from(agent.is_admin))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert the category and its roster, in `agent_ids` order.
    pub async fn create_category(&self, category: &Category) -> DomainResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO categories (id, name, fallback_admin_id) VALUES (?, ?, ?)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(category.fallback_admin_id.clone())
            .execute(&mut *tx)
            .await?;

        for (position, agent_id) in category.agent_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO category_agents (category_id, agent_id, position) VALUES (?, ?, ?)",
            )
            .bind(&category.id)
            .bind(agent_id)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Append an agent to the end of a category roster.
    pub async fn add_category_agent(&self, category_id: &str, agent_id: &str) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO category_agents (category_id, agent_id, position)
             SELECT ?, ?, COALESCE(MAX(position) + 1, 0) FROM category_agents WHERE category_id = ?",
        )
        .bind(category_id)
        .bind(agent_id)
        .bind(category_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn first_admin_id(&self) -> DomainResult<Option<String>> {
        let row = sqlx::query("SELECT id FROM agents WHERE is_admin = 1 ORDER BY rowid LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(match row {
            Some(row) => Some(row.try_get("id")?),
            None => None,
        })
    }
}

#[async_trait::async_trait]
impl CategoryRepository for Database {
    async fn get_category(&self, category_id: &str) -> DomainResult<Option<Category>> {
        let row = sqlx::query("SELECT id, name, fallback_admin_id FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let designated_admin = nullable_text(&row, "fallback_admin_id");

        let roster = sqlx::query(
            "SELECT agent_id FROM category_agents WHERE category_id = ? ORDER BY position, rowid",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        let agent_ids = roster
            .iter()
            .map(|r| r.try_get::<String, _>("agent_id"))
            .collect::<Result<Vec<_>, _>>()?;

        let fallback_admin_id = match designated_admin {
            Some(admin_id) => Some(admin_id),
            None => self.first_admin_id().await?,
        };

        Ok(Some(Category {
            id,
            name,
            agent_ids,
            fallback_admin_id,
        }))
    }

    async fn count_open_tickets(&self, agent_id: &str, resolved_status: &str) -> DomainResult<u64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS open_count FROM tickets
             WHERE agent_id = ? AND completed_at IS NULL AND status <> ?",
        )
        .bind(agent_id)
        .bind(resolved_status)
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.try_get("open_count")?;
        Ok(count.max(0) as u64)
    }
}
