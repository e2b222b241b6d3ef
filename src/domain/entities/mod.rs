pub mod agent;
pub mod sla;
pub mod ticket;

pub use agent::*;
pub use sla::*;
pub use ticket::*;
