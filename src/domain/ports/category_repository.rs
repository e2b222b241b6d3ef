use crate::domain::entities::Category;
use crate::domain::errors::DomainResult;

#[async_trait::async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Category with its roster in enumeration order and its fallback
    /// administrator resolved.
    async fn get_category(&self, category_id: &str) -> DomainResult<Option<Category>>;

    /// Number of tickets assigned to the agent that are not complete and
    /// whose status differs from `resolved_status`. Computed on every call.
    async fn count_open_tickets(&self, agent_id: &str, resolved_status: &str)
        -> DomainResult<u64>;
}
