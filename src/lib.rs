pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::{AssignmentService, SlaService};
pub use config::{Config, ConfigError};
pub use domain::entities::*;
pub use domain::errors::{DomainError, DomainResult};
