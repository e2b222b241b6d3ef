pub mod load_balancer;
pub mod sla_policy;
