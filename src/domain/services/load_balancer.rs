use crate::domain::entities::Category;
use crate::domain::errors::{DomainError, DomainResult};

/// Pick the least-loaded agent from the category roster.
///
/// The roster is scanned once in enumeration order and a strictly smaller
/// count is required to replace the current pick, so ties go to the earlier
/// agent. An empty roster yields the category's fallback administrator.
pub fn select_agent<F>(category: &Category, mut open_tickets: F) -> DomainResult<String>
where
    F: FnMut(&str) -> u64,
{
    let mut selected: Option<(&str, u64)> = None;

    for agent_id in &category.agent_ids {
        let count = open_tickets(agent_id.as_str());
        match selected {
            Some((_, lowest)) if count >= lowest => {}
            _ => selected = Some((agent_id.as_str(), count)),
        }
    }

    if let Some((agent_id, _)) = selected {
        return Ok(agent_id.to_string());
    }

    category
        .fallback_admin_id
        .clone()
        .ok_or_else(|| DomainError::NoEligibleAgent {
            category_id: category.id.clone(),
        })
}
