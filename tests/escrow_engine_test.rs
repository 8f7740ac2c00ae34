///! Tests for the escrow state machine: funding, release, disputes and the
///! ledger-derived amounts. Pure in-memory transitions — no server or
///! database is needed.
///!
///! Run with: `cargo test --test escrow_engine_test`
use chrono::Utc;
use uuid::Uuid;

use freelancehub_backend::escrow::{self, EscrowError};
use freelancehub_backend::models::escrows::{
    DisputeResolution, DisputeStatus, MilestoneStatus, Status, TransactionKind,
};
use freelancehub_backend::models::projects::MilestonePlan;

fn plan(title: &str, amount: f64) -> MilestonePlan {
    MilestonePlan {
        title: title.to_string(),
        description: None,
        amount,
        due_date: None,
    }
}

/// Helper: a pending escrow with the given milestone amounts.
fn escrow_with_milestones(total: f64, amounts: &[f64]) -> freelancehub_backend::models::escrows::Model {
    let plans = amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| plan(&format!("Milestone {}", i + 1), amount))
        .collect();
    escrow::build_escrow(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        total,
        "INR".to_string(),
        "traditional".to_string(),
        plans,
        Utc::now(),
    )
}

#[test]
fn test_build_escrow_defaults_to_single_completion_milestone() {
    let e = escrow::build_escrow(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        1000.0,
        "INR".to_string(),
        "traditional".to_string(),
        Vec::new(),
        Utc::now(),
    );

    assert_eq!(e.status, Status::Pending);
    assert_eq!(e.milestones.0.len(), 1);
    assert_eq!(e.milestones.0[0].title, "Project Completion");
    assert_eq!(e.milestones.0[0].amount, 1000.0);
    assert_eq!(e.milestones.0[0].status, MilestoneStatus::Pending);
    assert!(e.transactions.0.is_empty());
    assert_eq!(e.remaining_amount(), 1000.0);
}

#[test]
fn test_full_funding_then_release_completes_escrow() {
    // Scenario: total 1000, one milestone of 1000.
    let mut e = escrow_with_milestones(1000.0, &[1000.0]);

    escrow::fund(&mut e, 1000.0, None, None).expect("full funding should succeed");
    assert_eq!(e.status, Status::Funded);
    assert_eq!(e.milestones.0[0].status, MilestoneStatus::Funded);
    assert!(e.milestones.0[0].funded_at.is_some());

    let done = escrow::release(&mut e, 0, None).expect("release should succeed");
    assert!(done, "releasing the only milestone finishes the escrow");
    assert_eq!(e.status, Status::Released);
    assert_eq!(e.milestones.0[0].status, MilestoneStatus::Released);
    assert_eq!(e.released_amount(), 1000.0);
    assert_eq!(e.remaining_amount(), 0.0);
}

#[test]
fn test_milestone_funding_requires_exact_amount() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);

    let err = escrow::fund(&mut e, 250.0, Some(0), None).unwrap_err();
    assert_eq!(err, EscrowError::MilestoneAmountMismatch { expected: 300.0 });
    // Rejected transitions leave the escrow untouched.
    assert_eq!(e.status, Status::Pending);
    assert!(e.transactions.0.is_empty());
}

#[test]
fn test_full_funding_requires_exact_total() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);

    let err = escrow::fund(&mut e, 999.0, None, None).unwrap_err();
    assert_eq!(err, EscrowError::TotalAmountMismatch { expected: 1000.0 });
}

#[test]
fn test_partial_milestone_funding_and_release_flow() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);

    escrow::fund(&mut e, 300.0, Some(0), None).unwrap();
    assert_eq!(e.milestones.0[0].status, MilestoneStatus::Funded);
    assert_eq!(e.milestones.0[1].status, MilestoneStatus::Pending);
    // Not all milestones covered yet.
    assert_eq!(e.status, Status::PartiallyReleased);

    escrow::fund(&mut e, 700.0, Some(1), None).unwrap();
    assert_eq!(e.status, Status::Funded);

    let done = escrow::release(&mut e, 0, Some("txn-1".to_string())).unwrap();
    assert!(!done);
    assert_eq!(e.status, Status::PartiallyReleased);
    assert_eq!(e.released_amount(), 300.0);
    assert_eq!(e.remaining_amount(), 700.0);

    let done = escrow::release(&mut e, 1, None).unwrap();
    assert!(done);
    assert_eq!(e.status, Status::Released);
    assert_eq!(e.released_amount(), 1000.0);
    assert_eq!(e.remaining_amount(), 0.0);
}

#[test]
fn test_cannot_fund_same_milestone_twice() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 300.0, Some(0), None).unwrap();

    let err = escrow::fund(&mut e, 300.0, Some(0), None).unwrap_err();
    assert_eq!(err, EscrowError::MilestoneAlreadyFunded);
}

#[test]
fn test_cannot_release_unfunded_or_released_milestone() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);

    // Pending milestone cannot be released.
    assert_eq!(
        escrow::release(&mut e, 0, None).unwrap_err(),
        EscrowError::MilestoneNotFunded
    );

    escrow::fund(&mut e, 300.0, Some(0), None).unwrap();
    escrow::release(&mut e, 0, None).unwrap();

    // Released milestone cannot be released again.
    assert_eq!(
        escrow::release(&mut e, 0, None).unwrap_err(),
        EscrowError::MilestoneAlreadyReleased
    );
    // releasedAmount reflects exactly one release.
    assert_eq!(e.released_amount(), 300.0);
}

#[test]
fn test_out_of_range_milestone_index() {
    let mut e = escrow_with_milestones(1000.0, &[1000.0]);
    assert_eq!(
        escrow::fund(&mut e, 1000.0, Some(3), None).unwrap_err(),
        EscrowError::MilestoneOutOfRange(3)
    );
    assert_eq!(
        escrow::release(&mut e, 1, None).unwrap_err(),
        EscrowError::MilestoneOutOfRange(1)
    );
}

#[test]
fn test_dispute_cannot_be_opened_twice() {
    let mut e = escrow_with_milestones(1000.0, &[1000.0]);

    escrow::initiate_dispute(&mut e, "work not delivered".to_string()).unwrap();
    assert_eq!(e.status, Status::Disputed);
    assert_eq!(e.dispute_status, Some(DisputeStatus::Open));

    let err = escrow::initiate_dispute(&mut e, "again".to_string()).unwrap_err();
    assert_eq!(err, EscrowError::AlreadyDisputed);
    assert_eq!(err.to_string(), "Escrow is already under dispute");
}

#[test]
fn test_resolve_requires_open_dispute() {
    let mut e = escrow_with_milestones(1000.0, &[1000.0]);
    assert_eq!(
        escrow::resolve_dispute(&mut e, DisputeResolution::Settled).unwrap_err(),
        EscrowError::NotDisputed
    );
}

#[test]
fn test_freelancer_favor_releases_everything() {
    // Scenario: two unreleased milestones of 300 and 700, nothing released.
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 1000.0, None, None).unwrap();
    escrow::initiate_dispute(&mut e, "quality dispute".to_string()).unwrap();

    escrow::resolve_dispute(&mut e, DisputeResolution::FreelancerFavor).unwrap();

    assert_eq!(e.status, Status::Released);
    assert!(e.milestones.0.iter().all(|m| m.status == MilestoneStatus::Released));
    // One release transaction per forced milestone, amounts 300 and 700.
    let releases: Vec<f64> = e
        .transactions
        .0
        .iter()
        .filter(|t| t.kind == TransactionKind::Release)
        .map(|t| t.amount)
        .collect();
    assert_eq!(releases, vec![300.0, 700.0]);
    assert_eq!(e.released_amount(), 1000.0);
    assert_eq!(e.remaining_amount(), 0.0);
    assert_eq!(e.dispute_status, Some(DisputeStatus::FreelancerFavor));
    assert!(e.dispute_resolved_at.is_some());
}

#[test]
fn test_client_favor_refunds_remaining() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 1000.0, None, None).unwrap();
    // First milestone already paid out before the dispute.
    escrow::release(&mut e, 0, None).unwrap();
    escrow::initiate_dispute(&mut e, "missed deadline".to_string()).unwrap();

    escrow::resolve_dispute(&mut e, DisputeResolution::ClientFavor).unwrap();

    assert_eq!(e.status, Status::Refunded);
    // The refund covers exactly what was still held.
    assert_eq!(e.refunded_amount(), 700.0);
    assert_eq!(e.released_amount(), 300.0);
    assert_eq!(e.remaining_amount(), 0.0);
    assert_eq!(e.dispute_status, Some(DisputeStatus::ClientFavor));
}

#[test]
fn test_settled_resolution_moves_no_funds() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 1000.0, None, None).unwrap();
    escrow::initiate_dispute(&mut e, "scope disagreement".to_string()).unwrap();
    let ledger_before = e.transactions.0.len();

    escrow::resolve_dispute(&mut e, DisputeResolution::Settled).unwrap();

    // No transaction appended, no forced status transition.
    assert_eq!(e.transactions.0.len(), ledger_before);
    assert_eq!(e.status, Status::Disputed);
    assert_eq!(e.dispute_status, Some(DisputeStatus::Settled));
    assert!(e.dispute_resolved_at.is_some());
}

#[test]
fn test_released_escrow_rejects_further_funding() {
    let mut e = escrow_with_milestones(1000.0, &[1000.0]);
    escrow::fund(&mut e, 1000.0, None, None).unwrap();
    escrow::release(&mut e, 0, None).unwrap();
    let ledger_before = e.transactions.0.len();

    // Terminal escrows accept no more money.
    let err = escrow::fund(&mut e, 1000.0, None, None).unwrap_err();
    assert_eq!(err, EscrowError::NotActive(Status::Released));
    assert_eq!(err.to_string(), "Escrow is already released");
    assert_eq!(e.status, Status::Released);
    assert_eq!(e.transactions.0.len(), ledger_before);
}

#[test]
fn test_funded_escrow_rejects_second_full_funding() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 1000.0, None, None).unwrap();

    let err = escrow::fund(&mut e, 1000.0, None, None).unwrap_err();
    assert_eq!(err, EscrowError::AlreadyFunded);
    assert_eq!(e.transactions.0.len(), 1);
    assert_eq!(e.status, Status::Funded);
}

#[test]
fn test_disputed_escrow_rejects_fund_and_release() {
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 300.0, Some(0), None).unwrap();
    escrow::initiate_dispute(&mut e, "stalled work".to_string()).unwrap();

    assert_eq!(
        escrow::fund(&mut e, 700.0, Some(1), None).unwrap_err(),
        EscrowError::NotActive(Status::Disputed)
    );
    assert_eq!(
        escrow::release(&mut e, 0, None).unwrap_err(),
        EscrowError::NotActive(Status::Disputed)
    );
}

#[test]
fn test_refunded_escrow_rejects_release() {
    // A refund leaves milestone statuses untouched; the status guard is
    // what stops a release from paying out past the total.
    let mut e = escrow_with_milestones(1000.0, &[300.0, 700.0]);
    escrow::fund(&mut e, 1000.0, None, None).unwrap();
    escrow::initiate_dispute(&mut e, "cancelled order".to_string()).unwrap();
    escrow::resolve_dispute(&mut e, DisputeResolution::ClientFavor).unwrap();
    assert_eq!(e.remaining_amount(), 0.0);

    assert_eq!(
        escrow::release(&mut e, 0, None).unwrap_err(),
        EscrowError::NotActive(Status::Refunded)
    );
    assert_eq!(e.remaining_amount(), 0.0);
}

#[test]
fn test_remaining_amount_never_negative_through_lifecycle() {
    let mut e = escrow_with_milestones(1000.0, &[250.0, 250.0, 500.0]);
    assert!(e.remaining_amount() >= 0.0);

    escrow::fund(&mut e, 1000.0, None, None).unwrap();
    assert!(e.remaining_amount() >= 0.0);

    escrow::release(&mut e, 0, None).unwrap();
    assert!(e.remaining_amount() >= 0.0);

    escrow::initiate_dispute(&mut e, "dispute".to_string()).unwrap();
    escrow::resolve_dispute(&mut e, DisputeResolution::ClientFavor).unwrap();

    // total = released + refunded, nothing left.
    assert_eq!(e.released_amount() + e.refunded_amount(), e.total_amount);
    assert_eq!(e.remaining_amount(), 0.0);
}
