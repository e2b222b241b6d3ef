use crate::domain::{
    entities::{SlaEvaluation, SlaPolicy, Ticket, TicketSlaView},
    errors::DomainResult,
    ports::{Clock, SlaRepository, TicketRepository},
    services::sla_policy,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Service for evaluating ticket SLA deadlines against the injected clock
#[derive(Clone)]
pub struct SlaService {
    sla_repo: Arc<dyn SlaRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    clock: Arc<dyn Clock>,
    resolved_status: String,
}

impl SlaService {
    pub fn new(
        sla_repo: Arc<dyn SlaRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        clock: Arc<dyn Clock>,
        resolved_status: impl Into<String>,
    ) -> Self {
        Self {
            sla_repo,
            ticket_repo,
            clock,
            resolved_status: resolved_status.into(),
        }
    }

    // ========================================
    // SLA Policy Table
    // ========================================

    /// Look up the policy a ticket references. A missing id, or one that
    /// matches no stored policy, means no SLA applies.
    pub async fn resolve_policy(&self, policy_id: Option<&str>) -> DomainResult<Option<SlaPolicy>> {
        let Some(policy_id) = policy_id else {
            return Ok(None);
        };
        let policy = self.sla_repo.get_sla_policy(policy_id).await?;
        if policy.is_none() {
            debug!("SLA policy {} not found, no SLA applies", policy_id);
        }
        Ok(policy)
    }

    // ========================================
    // Violation Evaluation
    // ========================================

    pub async fn evaluate_response(&self, ticket: &Ticket) -> DomainResult<SlaEvaluation> {
        if ticket.has_comments() {
            return Ok(SlaEvaluation::NotApplicable);
        }
        let policy = self.resolve_policy(ticket.sla_id.as_deref()).await?;
        let now = self.clock.now();
        let result = sla_policy::evaluate_response(ticket, policy.as_ref(), now)?;
        debug!("Response SLA for ticket {} at {}: {}", ticket.id, now, result);
        Ok(result)
    }

    pub async fn evaluate_resolution(&self, ticket: &Ticket) -> DomainResult<SlaEvaluation> {
        if ticket.is_resolved(&self.resolved_status) {
            return Ok(SlaEvaluation::NotApplicable);
        }
        let policy = self.resolve_policy(ticket.sla_id.as_deref()).await?;
        let now = self.clock.now();
        let result =
            sla_policy::evaluate_resolution(ticket, policy.as_ref(), now, &self.resolved_status)?;
        debug!("Resolution SLA for ticket {} at {}: {}", ticket.id, now, result);
        Ok(result)
    }

    pub async fn is_resolution_violated(&self, ticket: &Ticket) -> DomainResult<bool> {
        let policy = self.resolve_policy(ticket.sla_id.as_deref()).await?;
        let now = self.clock.now();
        sla_policy::is_resolution_violated(ticket, policy.as_ref(), now)
    }

    /// All derived SLA attributes of a ticket, from one policy lookup and one
    /// clock sample.
    pub async fn ticket_sla_view(&self, ticket: &Ticket) -> DomainResult<TicketSlaView> {
        let policy = self.resolve_policy(ticket.sla_id.as_deref()).await?;
        let now = self.clock.now();
        build_view(ticket, policy.as_ref(), now, &self.resolved_status)
    }

    /// SLA view of every active ticket.
    pub async fn active_ticket_report(&self) -> DomainResult<Vec<TicketSlaView>> {
        let tickets = self.ticket_repo.list_active_tickets().await?;
        let now = self.clock.now();

        let mut views = Vec::with_capacity(tickets.len());
        for ticket in &tickets {
            let policy = self.resolve_policy(ticket.sla_id.as_deref()).await?;
            views.push(build_view(ticket, policy.as_ref(), now, &self.resolved_status)?);
        }

        let violated = views.iter().filter(|v| v.is_resolved_time_violated).count();
        info!(
            "SLA report built for {} active tickets ({} past resolution deadline)",
            views.len(),
            violated
        );
        Ok(views)
    }
}

fn build_view(
    ticket: &Ticket,
    policy: Option<&SlaPolicy>,
    now: chrono::DateTime<chrono::Utc>,
    resolved_status: &str,
) -> DomainResult<TicketSlaView> {
    let response = sla_policy::evaluate_response(ticket, policy, now)?;
    let resolution = sla_policy::evaluate_resolution(ticket, policy, now, resolved_status)?;
    let resolution_violated = sla_policy::is_resolution_violated(ticket, policy, now)?;

    let (response_deadline, resolution_deadline) = match policy {
        Some(policy) => (
            Some(sla_policy::response_deadline(ticket, policy)?),
            Some(sla_policy::resolution_deadline(ticket, policy)?),
        ),
        None => (None, None),
    };

    Ok(TicketSlaView {
        ticket_id: ticket.id.clone(),
        priority: ticket.priority.clone(),
        sla_id: ticket.sla_id.clone(),
        evaluated_at: now,
        response_deadline,
        resolution_deadline,
        remaining_response_time: response.remaining_hms(),
        remaining_resolve_time: resolution.remaining_hms(),
        is_response_violated: response.is_violated(),
        is_resolved_time_violated: resolution_violated,
    })
}
