use crate::domain::entities::SlaPolicy;
use crate::domain::errors::DomainResult;

/// Repository for SLA policy lookups
#[async_trait::async_trait]
pub trait SlaRepository: Send + Sync {
    async fn create_sla_policy(&self, policy: &SlaPolicy) -> DomainResult<()>;
    /// Returns `None` when no policy carries `policy_id`.
    async fn get_sla_policy(&self, policy_id: &str) -> DomainResult<Option<SlaPolicy>>;
}
