#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use ticketsla::{
    domain::ports::SlaRepository,
    infrastructure::{persistence::Database, runtime::FixedClock},
    Agent, AssignmentService, Category, PriorityTier, SlaPolicy, SlaService, Ticket,
    TierThresholds, DEFAULT_RESOLVED_STATUS,
};

/// Fixed reference instant for ticket creation.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Policy with Low 24h/72h, Medium 4h/48h, High 2h/24h, Urgent 1h/8h.
pub async fn create_test_sla_policy(db: &Database, name: &str) -> SlaPolicy {
    let policy = SlaPolicy::new(
        name.to_string(),
        TierThresholds::new(24, 72),
        TierThresholds::new(4, 48),
        TierThresholds::new(2, 24),
        TierThresholds::new(1, 8),
    );
    db.create_sla_policy(&policy)
        .await
        .expect("Failed to create SLA policy");
    policy
}

pub async fn create_test_ticket(
    db: &Database,
    category_id: &str,
    priority: PriorityTier,
    sla_id: Option<&str>,
    created_at: DateTime<Utc>,
) -> Ticket {
    let mut ticket = Ticket::new(
        "Cannot log in".to_string(),
        "customer-1".to_string(),
        category_id.to_string(),
        priority,
        "Open".to_string(),
        created_at,
    );
    ticket.sla_id = sla_id.map(str::to_string);
    db.create_ticket(&ticket)
        .await
        .expect("Failed to create ticket");
    ticket
}

pub async fn create_test_agent(db: &Database, name: &str, is_admin: bool) -> Agent {
    let agent = Agent::new(name.to_string(), is_admin);
    db.create_agent(&agent).await.expect("Failed to create agent");
    agent
}

pub async fn create_test_category(
    db: &Database,
    name: &str,
    roster: &[&Agent],
    fallback_admin: Option<&Agent>,
) -> Category {
    let mut category = Category::new(name.to_string());
    category.agent_ids = roster.iter().map(|a| a.id.clone()).collect();
    category.fallback_admin_id = fallback_admin.map(|a| a.id.clone());
    db.create_category(&category)
        .await
        .expect("Failed to create category");
    category
}

/// Give an agent `count` open tickets in the category.
pub async fn give_open_tickets(db: &Database, agent: &Agent, category_id: &str, count: usize) {
    for _ in 0..count {
        let mut ticket = Ticket::new(
            "Existing work".to_string(),
            "customer-2".to_string(),
            category_id.to_string(),
            PriorityTier::Low,
            "Open".to_string(),
            t0(),
        );
        ticket.agent_id = Some(agent.id.clone());
        db.create_ticket(&ticket)
            .await
            .expect("Failed to create ticket");
    }
}

pub fn sla_service(db: &Database, clock: Arc<FixedClock>) -> SlaService {
    let db = Arc::new(db.clone());
    SlaService::new(db.clone(), db, clock, DEFAULT_RESOLVED_STATUS)
}

pub fn assignment_service(db: &Database) -> AssignmentService {
    let db = Arc::new(db.clone());
    AssignmentService::new(db.clone(), db, DEFAULT_RESOLVED_STATUS)
}
