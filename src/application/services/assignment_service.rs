use crate::domain::{
    entities::Ticket,
    errors::{DomainError, DomainResult},
    ports::{CategoryRepository, TicketRepository},
    services::load_balancer,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Service for least-loaded automatic assignment of tickets to agents
#[derive(Clone)]
pub struct AssignmentService {
    ticket_repo: Arc<dyn TicketRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    resolved_status: String,
    // Serializes count-then-assign per category within this process. Agents
    // shared between categories are not covered.
    category_locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl AssignmentService {
    pub fn new(
        ticket_repo: Arc<dyn TicketRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        resolved_status: impl Into<String>,
    ) -> Self {
        Self {
            ticket_repo,
            category_repo,
            resolved_status: resolved_status.into(),
            category_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn category_lock(&self, category_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .category_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(category_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Choose the least-loaded agent for `category_id` without assigning.
    pub async fn select_agent(&self, category_id: &str) -> DomainResult<String> {
        let category = self
            .category_repo
            .get_category(category_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Category not found: {}", category_id)))?;

        let mut loads = HashMap::with_capacity(category.agent_ids.len());
        for agent_id in &category.agent_ids {
            let count = self
                .category_repo
                .count_open_tickets(agent_id, &self.resolved_status)
                .await?;
            loads.insert(agent_id.clone(), count);
        }

        if category.agent_ids.is_empty() {
            warn!(
                "Category {} has no eligible agents, falling back to administrator",
                category_id
            );
        }

        load_balancer::select_agent(&category, |agent_id| {
            loads.get(agent_id).copied().unwrap_or(0)
        })
    }

    /// Assign the ticket to the least-loaded agent of its category and persist
    /// the assignment. Only `agent_id` changes on the ticket.
    pub async fn auto_assign_agent(&self, ticket: &mut Ticket) -> DomainResult<String> {
        let lock = self.category_lock(&ticket.category_id);
        let _guard = lock.lock().await;

        let agent_id = self.select_agent(&ticket.category_id).await?;
        self.ticket_repo
            .update_ticket_agent(&ticket.id, &agent_id)
            .await?;
        ticket.agent_id = Some(agent_id.clone());

        info!(
            "Auto-assigned ticket {} in category {} to agent {}",
            ticket.id, ticket.category_id, agent_id
        );
        Ok(agent_id)
    }
}
