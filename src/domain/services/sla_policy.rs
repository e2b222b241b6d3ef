//! Deadline calculation and violation checks for ticket SLAs.
//!
//! Everything here is a pure function of the ticket, the resolved policy and
//! an instant supplied by the caller.

use crate::domain::entities::{SlaEvaluation, SlaPolicy, ThresholdKind, Ticket};
use crate::domain::errors::DomainResult;
use chrono::{DateTime, Duration, Utc};

/// Resolve a ticket's optional policy id against a lookup.
///
/// A ticket without a policy id, or with an id the lookup does not know,
/// has no SLA.
pub fn resolve_policy<'a, F>(policy_id: Option<&str>, lookup: F) -> Option<&'a SlaPolicy>
where
    F: FnOnce(&str) -> Option<&'a SlaPolicy>,
{
    policy_id.and_then(lookup)
}

/// `created_at` plus the policy threshold for the ticket's tier, in whole
/// 3600-second hours. Saturates at the latest representable instant.
pub fn deadline(
    ticket: &Ticket,
    policy: &SlaPolicy,
    kind: ThresholdKind,
) -> DomainResult<DateTime<Utc>> {
    let tier = ticket.priority_tier()?;
    let hours = policy.threshold_for(tier, kind);
    Ok(ticket
        .created_at
        .checked_add_signed(Duration::seconds(i64::from(hours) * 3600))
        .unwrap_or(DateTime::<Utc>::MAX_UTC))
}

pub fn response_deadline(ticket: &Ticket, policy: &SlaPolicy) -> DomainResult<DateTime<Utc>> {
    deadline(ticket, policy, ThresholdKind::FirstResponse)
}

pub fn resolution_deadline(ticket: &Ticket, policy: &SlaPolicy) -> DomainResult<DateTime<Utc>> {
    deadline(ticket, policy, ThresholdKind::Resolution)
}

fn compare(deadline: DateTime<Utc>, now: DateTime<Utc>) -> SlaEvaluation {
    if now < deadline {
        SlaEvaluation::Remaining(deadline - now)
    } else {
        SlaEvaluation::Violated
    }
}

/// First-response check. Not applicable once the ticket has a comment or
/// when no policy applies.
pub fn evaluate_response(
    ticket: &Ticket,
    policy: Option<&SlaPolicy>,
    now: DateTime<Utc>,
) -> DomainResult<SlaEvaluation> {
    if ticket.has_comments() {
        return Ok(SlaEvaluation::NotApplicable);
    }
    let Some(policy) = policy else {
        return Ok(SlaEvaluation::NotApplicable);
    };
    Ok(compare(response_deadline(ticket, policy)?, now))
}

/// Resolution check. Not applicable once the ticket carries the resolved
/// status or when no policy applies.
pub fn evaluate_resolution(
    ticket: &Ticket,
    policy: Option<&SlaPolicy>,
    now: DateTime<Utc>,
    resolved_status: &str,
) -> DomainResult<SlaEvaluation> {
    if ticket.is_resolved(resolved_status) {
        return Ok(SlaEvaluation::NotApplicable);
    }
    let Some(policy) = policy else {
        return Ok(SlaEvaluation::NotApplicable);
    };
    Ok(compare(resolution_deadline(ticket, policy)?, now))
}

/// True iff a policy applies and `now` is strictly past the resolution
/// deadline. Ignores ticket status.
pub fn is_resolution_violated(
    ticket: &Ticket,
    policy: Option<&SlaPolicy>,
    now: DateTime<Utc>,
) -> DomainResult<bool> {
    match policy {
        Some(policy) => Ok(now > resolution_deadline(ticket, policy)?),
        None => Ok(false),
    }
}
