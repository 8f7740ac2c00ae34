///! Tests for proposal bid validation and the project status transition
///! rules. Pure functions — no server or database is needed.
///!
///! Run with: `cargo test --test proposal_rules_test`
use chrono::Utc;
use sea_orm::{DbBackend, QueryTrait};
use uuid::Uuid;

use freelancehub_backend::db::proposals::reject_other_pending_query;
use freelancehub_backend::models::projects::{
    self, Categories, DurationBucket, ExperienceLevel, Milestones, PaymentType, Skills, Status,
    Visibility,
};
use freelancehub_backend::models::proposals::{ProposalError, validate_bid};

fn open_project(min: f64, max: f64, payment_type: PaymentType) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        title: "Landing page".to_string(),
        description: "Build a landing page".to_string(),
        category: Categories::WebDevelopment,
        skills: Skills(vec!["html".to_string(), "css".to_string()]),
        budget_min: min,
        budget_max: max,
        currency: "INR".to_string(),
        payment_type,
        duration: DurationBucket::LessThanOneMonth,
        experience_level: ExperienceLevel::Beginner,
        status: Status::Open,
        visibility: Visibility::Public,
        freelancer_id: None,
        escrow_id: None,
        milestones: Milestones(Vec::new()),
        start_date: None,
        completion_date: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_bid_above_budget_is_rejected_with_range_message() {
    // Budget [500, 1000], bid 1500 → out of range.
    let project = open_project(500.0, 1000.0, PaymentType::Fixed);

    let err = validate_bid(&project, 1500.0, PaymentType::Fixed).unwrap_err();
    assert_eq!(
        err,
        ProposalError::BidOutOfRange {
            min: 500.0,
            max: 1000.0
        }
    );
    assert_eq!(err.to_string(), "Bid amount must be between 500 and 1000");
}

#[test]
fn test_bid_below_budget_is_rejected() {
    let project = open_project(500.0, 1000.0, PaymentType::Fixed);

    let err = validate_bid(&project, 250.0, PaymentType::Fixed).unwrap_err();
    assert!(matches!(err, ProposalError::BidOutOfRange { .. }));
}

#[test]
fn test_bid_on_budget_boundaries_is_accepted() {
    let project = open_project(500.0, 1000.0, PaymentType::Fixed);

    // The range is inclusive on both ends.
    assert!(validate_bid(&project, 500.0, PaymentType::Fixed).is_ok());
    assert!(validate_bid(&project, 1000.0, PaymentType::Fixed).is_ok());
    assert!(validate_bid(&project, 750.0, PaymentType::Fixed).is_ok());
}

#[test]
fn test_bid_type_must_match_project_payment_type() {
    let project = open_project(500.0, 1000.0, PaymentType::Fixed);

    let err = validate_bid(&project, 750.0, PaymentType::Hourly).unwrap_err();
    assert_eq!(err, ProposalError::BidTypeMismatch);

    let hourly = open_project(20.0, 50.0, PaymentType::Hourly);
    assert!(validate_bid(&hourly, 30.0, PaymentType::Hourly).is_ok());
}

#[test]
fn test_range_check_runs_before_type_check() {
    // An out-of-range bid with the wrong type reports the range error, which
    // is the message clients surface to the user.
    let project = open_project(500.0, 1000.0, PaymentType::Fixed);

    let err = validate_bid(&project, 1500.0, PaymentType::Hourly).unwrap_err();
    assert!(matches!(err, ProposalError::BidOutOfRange { .. }));
}

#[test]
fn test_project_status_transitions() {
    // Allowed edges of the lifecycle.
    assert!(Status::Open.can_transition_to(Status::InProgress));
    assert!(Status::Open.can_transition_to(Status::Cancelled));
    assert!(Status::InProgress.can_transition_to(Status::Completed));
    assert!(Status::InProgress.can_transition_to(Status::Cancelled));

    // No skipping ahead or going backwards.
    assert!(!Status::Open.can_transition_to(Status::Completed));
    assert!(!Status::InProgress.can_transition_to(Status::Open));
    assert!(!Status::Completed.can_transition_to(Status::InProgress));
    assert!(!Status::Cancelled.can_transition_to(Status::Open));

    // Terminal states stay terminal.
    assert!(!Status::Completed.can_transition_to(Status::Cancelled));
    assert!(!Status::Cancelled.can_transition_to(Status::Completed));

    // Self-transitions are not transitions.
    assert!(!Status::Open.can_transition_to(Status::Open));
}

#[test]
fn test_sibling_rejection_targets_only_other_pending_proposals() {
    let project_id = Uuid::new_v4();
    let accepted_id = Uuid::new_v4();
    let now = Utc::now();

    let sql = reject_other_pending_query(project_id, accepted_id, now)
        .build(DbBackend::Postgres)
        .to_string();

    // Siblings move to rejected with the timestamp stamped.
    assert!(sql.contains(r#""status" = 'rejected'"#), "{sql}");
    assert!(sql.contains(r#""rejected_at" ="#), "{sql}");
    assert!(sql.contains(r#""updated_at" ="#), "{sql}");

    // Scoped to the project, skipping the accepted proposal, and only
    // touching rows that are still pending.
    assert!(sql.contains(&format!(r#""project_id" = '{project_id}'"#)), "{sql}");
    assert!(sql.contains(&format!(r#""id" <> '{accepted_id}'"#)), "{sql}");
    assert!(sql.contains(r#""status" = 'pending'"#), "{sql}");
}
