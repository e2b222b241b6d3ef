use crate::domain::entities::Ticket;
use crate::domain::errors::DomainResult;

#[async_trait::async_trait]
pub trait TicketRepository: Send + Sync {
    async fn get_ticket(&self, ticket_id: &str) -> DomainResult<Option<Ticket>>;
    /// Tickets without a completion timestamp.
    async fn list_active_tickets(&self) -> DomainResult<Vec<Ticket>>;
    /// Tickets with a completion timestamp.
    async fn list_complete_tickets(&self) -> DomainResult<Vec<Ticket>>;
    async fn list_user_tickets(&self, user_id: &str) -> DomainResult<Vec<Ticket>>;
    async fn list_agent_tickets(&self, agent_id: &str) -> DomainResult<Vec<Ticket>>;
    /// Tickets the given id either owns or is assigned to.
    async fn list_agent_user_tickets(&self, id: &str) -> DomainResult<Vec<Ticket>>;
    async fn update_ticket_agent(&self, ticket_id: &str, agent_id: &str) -> DomainResult<()>;
}
