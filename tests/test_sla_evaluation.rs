// Integration tests for SLA deadline evaluation against stored tickets
mod helpers;

use chrono::Duration;
use helpers::*;
use std::sync::Arc;
use ticketsla::domain::ports::TicketRepository;
use ticketsla::infrastructure::runtime::FixedClock;
use ticketsla::{DomainError, PriorityTier, SlaEvaluation};

#[tokio::test]
async fn test_medium_ticket_response_remaining_then_violated() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::Medium, Some(policy.id.as_str()), t0()).await;

    let clock = Arc::new(FixedClock::new(t0() + Duration::hours(2)));
    let service = sla_service(&db, clock.clone());

    let result = service.evaluate_response(&ticket).await.unwrap();
    assert_eq!(result, SlaEvaluation::Remaining(Duration::hours(2)));
    assert_eq!(result.remaining_hms().as_deref(), Some("02:00:00"));

    clock.set(t0() + Duration::hours(5));
    let result = service.evaluate_response(&ticket).await.unwrap();
    assert_eq!(result, SlaEvaluation::Violated);
}

#[tokio::test]
async fn test_response_just_before_and_after_deadline() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::Urgent, Some(policy.id.as_str()), t0()).await;

    let deadline = t0() + Duration::hours(1);
    let clock = Arc::new(FixedClock::new(deadline - Duration::seconds(30)));
    let service = sla_service(&db, clock.clone());

    assert_eq!(
        service.evaluate_response(&ticket).await.unwrap(),
        SlaEvaluation::Remaining(Duration::seconds(30))
    );

    clock.set(deadline + Duration::seconds(30));
    assert_eq!(
        service.evaluate_response(&ticket).await.unwrap(),
        SlaEvaluation::Violated
    );
}

#[tokio::test]
async fn test_commented_ticket_response_not_applicable() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::High, Some(policy.id.as_str()), t0()).await;
    db.record_comment(&ticket.id, t0() + Duration::minutes(10))
        .await
        .unwrap();

    let stored = db.get_ticket(&ticket.id).await.unwrap().unwrap();
    assert_eq!(stored.comment_count, 1);
    assert!(stored.has_comments());

    let clock = Arc::new(FixedClock::new(t0() + Duration::days(10)));
    let service = sla_service(&db, clock);
    assert_eq!(
        service.evaluate_response(&stored).await.unwrap(),
        SlaEvaluation::NotApplicable
    );
}

#[tokio::test]
async fn test_ticket_without_sla_reports_nothing() {
    let db = setup_test_db().await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::Urgent, None, t0()).await;

    let clock = Arc::new(FixedClock::new(t0() + Duration::days(365)));
    let service = sla_service(&db, clock);

    assert_eq!(
        service.evaluate_response(&ticket).await.unwrap(),
        SlaEvaluation::NotApplicable
    );
    assert_eq!(
        service.evaluate_resolution(&ticket).await.unwrap(),
        SlaEvaluation::NotApplicable
    );
    assert!(!service.is_resolution_violated(&ticket).await.unwrap());
}

#[tokio::test]
async fn test_unresolvable_sla_id_is_not_an_error() {
    let db = setup_test_db().await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::Low, Some("deleted-policy"), t0()).await;

    let clock = Arc::new(FixedClock::new(t0() + Duration::days(30)));
    let service = sla_service(&db, clock);

    assert!(service.resolve_policy(Some("deleted-policy")).await.unwrap().is_none());
    assert_eq!(
        service.evaluate_resolution(&ticket).await.unwrap(),
        SlaEvaluation::NotApplicable
    );
    assert!(!service.is_resolution_violated(&ticket).await.unwrap());
}

#[tokio::test]
async fn test_resolution_evaluation_and_flag() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::Urgent, Some(policy.id.as_str()), t0()).await;

    let clock = Arc::new(FixedClock::new(t0() + Duration::hours(6)));
    let service = sla_service(&db, clock.clone());

    let result = service.evaluate_resolution(&ticket).await.unwrap();
    assert_eq!(result.remaining_hms().as_deref(), Some("02:00:00"));
    assert!(!service.is_resolution_violated(&ticket).await.unwrap());

    clock.set(t0() + Duration::hours(9));
    assert_eq!(
        service.evaluate_resolution(&ticket).await.unwrap(),
        SlaEvaluation::Violated
    );
    assert!(service.is_resolution_violated(&ticket).await.unwrap());
}

#[tokio::test]
async fn test_resolved_status_stops_resolution_evaluation_but_not_flag() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;
    let ticket = create_test_ticket(&db, "general", PriorityTier::Urgent, Some(policy.id.as_str()), t0()).await;
    db.update_ticket_status(&ticket.id, "Resolved").await.unwrap();
    let stored = db.get_ticket(&ticket.id).await.unwrap().unwrap();

    let clock = Arc::new(FixedClock::new(t0() + Duration::hours(12)));
    let service = sla_service(&db, clock);

    assert_eq!(
        service.evaluate_resolution(&stored).await.unwrap(),
        SlaEvaluation::NotApplicable
    );
    assert!(service.is_resolution_violated(&stored).await.unwrap());
}

#[tokio::test]
async fn test_unknown_priority_fails_evaluation() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;
    let mut ticket = create_test_ticket(&db, "general", PriorityTier::Low, Some(policy.id.as_str()), t0()).await;
    ticket.priority = "Critical".to_string();

    let service = sla_service(&db, Arc::new(FixedClock::new(t0())));

    let err = service.evaluate_response(&ticket).await.unwrap_err();
    assert!(matches!(err, DomainError::UnknownPriorityTier(ref name) if name == "Critical"));
    assert!(service.is_resolution_violated(&ticket).await.is_err());
}

#[tokio::test]
async fn test_active_ticket_report() {
    let db = setup_test_db().await;
    let policy = create_test_sla_policy(&db, "Standard").await;

    let pending = create_test_ticket(&db, "general", PriorityTier::Medium, Some(policy.id.as_str()), t0()).await;
    let late = create_test_ticket(
        &db,
        "general",
        PriorityTier::Urgent,
        Some(policy.id.as_str()),
        t0() - Duration::days(1),
    )
    .await;
    let no_sla = create_test_ticket(&db, "general", PriorityTier::High, None, t0()).await;
    let done = create_test_ticket(&db, "general", PriorityTier::High, Some(policy.id.as_str()), t0()).await;
    db.complete_ticket(&done.id, t0() + Duration::minutes(30))
        .await
        .unwrap();

    let service = sla_service(&db, Arc::new(FixedClock::new(t0() + Duration::hours(1))));
    let report = service.active_ticket_report().await.unwrap();

    assert_eq!(report.len(), 3);
    assert!(report.iter().all(|v| v.ticket_id != done.id));

    let view = report.iter().find(|v| v.ticket_id == pending.id).unwrap();
    assert_eq!(view.remaining_response_time.as_deref(), Some("03:00:00"));
    assert_eq!(view.remaining_resolve_time.as_deref(), Some("47:00:00"));
    assert_eq!(view.response_deadline, Some(t0() + Duration::hours(4)));
    assert!(!view.is_response_violated);
    assert!(!view.is_resolved_time_violated);

    let view = report.iter().find(|v| v.ticket_id == late.id).unwrap();
    assert_eq!(view.remaining_response_time, None);
    assert!(view.is_response_violated);
    assert!(view.is_resolved_time_violated);

    let view = report.iter().find(|v| v.ticket_id == no_sla.id).unwrap();
    assert_eq!(view.response_deadline, None);
    assert_eq!(view.remaining_response_time, None);
    assert!(!view.is_response_violated);
    assert!(!view.is_resolved_time_violated);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json[0].get("is_resolved_time_violated").is_some());
}
