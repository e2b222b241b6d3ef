pub mod assignment_service;
pub mod sla_service;

pub use assignment_service::AssignmentService;
pub use sla_service::SlaService;
