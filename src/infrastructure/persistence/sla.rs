use crate::domain::entities::{SlaPolicy, TierThresholds};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::SlaRepository;
use crate::infrastructure::persistence::Database;
use sqlx::{any::AnyRow, Row};

fn hours(row: &AnyRow, column: &str) -> DomainResult<u32> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value)
        .map_err(|_| DomainError::Database(format!("Invalid hour threshold in {}: {}", column, value)))
}

fn tier(row: &AnyRow, prefix: &str) -> DomainResult<TierThresholds> {
    Ok(TierThresholds::new(
        hours(row, &format!("{}_first_response", prefix))?,
        hours(row, &format!("{}_resolve_within", prefix))?,
    ))
}

#[async_trait::async_trait]
impl SlaRepository for Database {
    async fn create_sla_policy(&self, policy: &SlaPolicy) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO sla_policies (id, name,
                low_first_response, low_resolve_within,
                medium_first_response, medium_resolve_within,
                high_first_response, high_resolve_within,
                urgent_first_response, urgent_resolve_within)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&policy.id)
        .bind(&policy.name)
        .bind(i64::from(policy.low.first_response_hours))
        .bind(i64::from(policy.low.resolution_hours))
        .bind(i64::from(policy.medium.first_response_hours))
        .bind(i64::from(policy.medium.resolution_hours))
        .bind(i64::from(policy.high.first_response_hours))
        .bind(i64::from(policy.high.resolution_hours))
        .bind(i64::from(policy.urgent.first_response_hours))
        .bind(i64::from(policy.urgent.resolution_hours))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_sla_policy(&self, policy_id: &str) -> DomainResult<Option<SlaPolicy>> {
        let row = sqlx::query(
            "SELECT id, name,
                low_first_response, low_resolve_within,
                medium_first_response, medium_resolve_within,
                high_first_response, high_resolve_within,
                urgent_first_response, urgent_resolve_within
             FROM sla_policies WHERE id = ?",
        )
        .bind(policy_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(SlaPolicy {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            low: tier(&row, "low")?,
            medium: tier(&row, "medium")?,
            high: tier(&row, "high")?,
            urgent: tier(&row, "urgent")?,
        }))
    }
}
