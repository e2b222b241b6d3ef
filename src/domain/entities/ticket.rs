use crate::domain::entities::PriorityTier;
use crate::domain::errors::DomainResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESOLVED_STATUS: &str = "Resolved";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub user_id: String,
    pub category_id: String,
    /// Priority tier name as stored, e.g. "Medium".
    pub priority: String,
    pub status: String,
    pub agent_id: Option<String>,
    pub sla_id: Option<String>,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn new(
        subject: String,
        user_id: String,
        category_id: String,
        priority: PriorityTier,
        status: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject,
            user_id,
            category_id,
            priority: priority.to_string(),
            status,
            agent_id: None,
            sla_id: None,
            comment_count: 0,
            created_at,
            completed_at: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn has_comments(&self) -> bool {
        self.comment_count > 0
    }

    pub fn is_resolved(&self, resolved_status: &str) -> bool {
        self.status == resolved_status
    }

    /// Parse the stored priority name. Fails with `UnknownPriorityTier`.
    pub fn priority_tier(&self) -> DomainResult<PriorityTier> {
        self.priority.parse()
    }
}
