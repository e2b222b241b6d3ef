pub mod category_repository;
pub mod clock;
pub mod sla_repository;
pub mod ticket_repository;

pub use category_repository::CategoryRepository;
pub use clock::Clock;
pub use sla_repository::SlaRepository;
pub use ticket_repository::TicketRepository;
