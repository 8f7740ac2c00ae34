//! Escrow state machine.
//!
//! Pure transitions over an in-memory `escrows::Model`; handlers load the
//! row, apply a transition, and persist the result. Every rejected
//! transition leaves the escrow untouched, so a failed request never
//! produces a partial write.

use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeUtc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::escrows::{
    self, DisputeResolution, DisputeStatus, Milestone, MilestoneStatus, Milestones, Status,
    Transaction, TransactionKind, TransactionStatus, Transactions,
};
use crate::models::projects::MilestonePlan;

/// Escrows expire if untouched for this long.
const ESCROW_LIFETIME_DAYS: i64 = 180;

#[derive(Debug, Error, PartialEq)]
pub enum EscrowError {
    #[error("Milestone index {0} is out of range")]
    MilestoneOutOfRange(usize),
    #[error("Milestone has already been funded")]
    MilestoneAlreadyFunded,
    #[error("Milestone has already been released")]
    MilestoneAlreadyReleased,
    #[error("Only funded milestones can be released")]
    MilestoneNotFunded,
    #[error("Amount must equal the milestone amount of {expected}")]
    MilestoneAmountMismatch { expected: f64 },
    #[error("Amount must equal the escrow total of {expected}")]
    TotalAmountMismatch { expected: f64 },
    #[error("Escrow has already been fully funded")]
    AlreadyFunded,
    #[error("Escrow is already {0}")]
    NotActive(Status),
    #[error("Escrow is already under dispute")]
    AlreadyDisputed,
    #[error("Escrow is not under dispute")]
    NotDisputed,
}

/// Fund and release are only legal while money is still in play; terminal
/// and disputed escrows reject both.
fn ensure_open(escrow: &escrows::Model) -> Result<(), EscrowError> {
    match escrow.status {
        Status::Released | Status::Refunded | Status::Disputed => {
            Err(EscrowError::NotActive(escrow.status))
        }
        Status::Pending | Status::Funded | Status::PartiallyReleased => Ok(()),
    }
}

impl escrows::Model {
    /// Sum of completed release transactions. Recomputed from the ledger on
    /// every read, never cached.
    pub fn released_amount(&self) -> f64 {
        self.completed_total(TransactionKind::Release)
    }

    /// Sum of completed refund transactions.
    pub fn refunded_amount(&self) -> f64 {
        self.completed_total(TransactionKind::Refund)
    }

    /// What is still held: total minus completed releases and refunds.
    pub fn remaining_amount(&self) -> f64 {
        self.total_amount - self.released_amount() - self.refunded_amount()
    }

    fn completed_total(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .0
            .iter()
            .filter(|t| t.kind == kind && t.status == TransactionStatus::Completed)
            .map(|t| t.amount)
            .sum()
    }
}

/// Construct a new pending escrow. If no milestone breakdown is given, a
/// single full-amount "Project Completion" milestone due in 30 days is used.
#[allow(clippy::too_many_arguments)]
pub fn build_escrow(
    project_id: Uuid,
    client_id: Uuid,
    freelancer_id: Uuid,
    total_amount: f64,
    currency: String,
    payment_type: String,
    milestones: Vec<MilestonePlan>,
    now: DateTimeUtc,
) -> escrows::Model {
    let plans = if milestones.is_empty() {
        vec![MilestonePlan {
            title: "Project Completion".to_string(),
            description: Some("Full project delivery".to_string()),
            amount: total_amount,
            due_date: Some(now + Duration::days(30)),
        }]
    } else {
        milestones
    };

    escrows::Model {
        id: Uuid::new_v4(),
        project_id,
        client_id,
        freelancer_id,
        total_amount,
        currency,
        payment_type,
        status: Status::Pending,
        milestones: Milestones(plans.into_iter().map(Milestone::from_plan).collect()),
        transactions: Transactions(Vec::new()),
        dispute_reason: None,
        dispute_status: None,
        dispute_resolved_at: None,
        expiry_date: now + Duration::days(ESCROW_LIFETIME_DAYS),
        created_at: now,
        updated_at: None,
    }
}

/// Fund the escrow.
///
/// With a milestone index the amount must exactly equal that milestone's
/// amount; without one the amount must equal the escrow total and every
/// pending milestone is funded at once.
pub fn fund(
    escrow: &mut escrows::Model,
    amount: f64,
    milestone_index: Option<usize>,
    reference: Option<String>,
) -> Result<(), EscrowError> {
    ensure_open(escrow)?;
    let now = Utc::now();

    match milestone_index {
        Some(index) => {
            let milestone = escrow
                .milestones
                .0
                .get_mut(index)
                .ok_or(EscrowError::MilestoneOutOfRange(index))?;

            match milestone.status {
                MilestoneStatus::Funded => return Err(EscrowError::MilestoneAlreadyFunded),
                MilestoneStatus::Released => return Err(EscrowError::MilestoneAlreadyReleased),
                MilestoneStatus::Pending | MilestoneStatus::Disputed => {}
            }
            if amount != milestone.amount {
                return Err(EscrowError::MilestoneAmountMismatch {
                    expected: milestone.amount,
                });
            }

            milestone.status = MilestoneStatus::Funded;
            milestone.funded_at = Some(now);
            escrow.transactions.0.push(Transaction {
                kind: TransactionKind::Fund,
                amount,
                date: now,
                reference,
                status: TransactionStatus::Completed,
            });

            let all_covered = escrow.milestones.0.iter().all(|m| {
                matches!(m.status, MilestoneStatus::Funded | MilestoneStatus::Released)
            });
            escrow.status = if all_covered {
                Status::Funded
            } else {
                Status::PartiallyReleased
            };
        }
        None => {
            if escrow.status == Status::Funded {
                return Err(EscrowError::AlreadyFunded);
            }
            if amount != escrow.total_amount {
                return Err(EscrowError::TotalAmountMismatch {
                    expected: escrow.total_amount,
                });
            }
            for milestone in &mut escrow.milestones.0 {
                if milestone.status == MilestoneStatus::Pending {
                    milestone.status = MilestoneStatus::Funded;
                    milestone.funded_at = Some(now);
                }
            }
            escrow.transactions.0.push(Transaction {
                kind: TransactionKind::Fund,
                amount,
                date: now,
                reference,
                status: TransactionStatus::Completed,
            });
            escrow.status = Status::Funded;
        }
    }

    escrow.updated_at = Some(now);
    Ok(())
}

/// Release a funded milestone to the freelancer.
///
/// Returns true when this was the last milestone, i.e. the escrow is now
/// fully released and the parent project should be marked completed.
pub fn release(
    escrow: &mut escrows::Model,
    milestone_index: usize,
    reference: Option<String>,
) -> Result<bool, EscrowError> {
    ensure_open(escrow)?;
    let now = Utc::now();

    let milestone = escrow
        .milestones
        .0
        .get_mut(milestone_index)
        .ok_or(EscrowError::MilestoneOutOfRange(milestone_index))?;

    match milestone.status {
        MilestoneStatus::Funded => {}
        MilestoneStatus::Released => return Err(EscrowError::MilestoneAlreadyReleased),
        MilestoneStatus::Pending | MilestoneStatus::Disputed => {
            return Err(EscrowError::MilestoneNotFunded);
        }
    }

    milestone.status = MilestoneStatus::Released;
    milestone.released_at = Some(now);
    let amount = milestone.amount;

    escrow.transactions.0.push(Transaction {
        kind: TransactionKind::Release,
        amount,
        date: now,
        reference,
        status: TransactionStatus::Completed,
    });

    let fully_released = escrow
        .milestones
        .0
        .iter()
        .all(|m| m.status == MilestoneStatus::Released);
    escrow.status = if fully_released {
        Status::Released
    } else {
        Status::PartiallyReleased
    };
    escrow.updated_at = Some(now);

    Ok(fully_released)
}

/// Open a dispute. Either party may dispute; an escrow can only carry one
/// open dispute at a time.
pub fn initiate_dispute(escrow: &mut escrows::Model, reason: String) -> Result<(), EscrowError> {
    if escrow.status == Status::Disputed {
        return Err(EscrowError::AlreadyDisputed);
    }

    escrow.status = Status::Disputed;
    escrow.dispute_reason = Some(reason);
    escrow.dispute_status = Some(DisputeStatus::Open);
    escrow.updated_at = Some(Utc::now());
    Ok(())
}

/// Resolve a dispute (admin only).
///
/// - client-favor: refund whatever the ledger says is still held.
/// - freelancer-favor: force-release every unreleased milestone, one
///   transaction each.
/// - settled: no fund movement; follow-up is manual.
pub fn resolve_dispute(
    escrow: &mut escrows::Model,
    resolution: DisputeResolution,
) -> Result<(), EscrowError> {
    if escrow.status != Status::Disputed {
        return Err(EscrowError::NotDisputed);
    }

    let now = Utc::now();

    match resolution {
        DisputeResolution::ClientFavor => {
            let remaining = escrow.remaining_amount();
            if remaining > 0.0 {
                escrow.transactions.0.push(Transaction {
                    kind: TransactionKind::Refund,
                    amount: remaining,
                    date: now,
                    reference: None,
                    status: TransactionStatus::Completed,
                });
            }
            escrow.status = Status::Refunded;
        }
        DisputeResolution::FreelancerFavor => {
            let mut releases = Vec::new();
            for milestone in &mut escrow.milestones.0 {
                if milestone.status != MilestoneStatus::Released {
                    milestone.status = MilestoneStatus::Released;
                    milestone.released_at = Some(now);
                    releases.push(Transaction {
                        kind: TransactionKind::Release,
                        amount: milestone.amount,
                        date: now,
                        reference: None,
                        status: TransactionStatus::Completed,
                    });
                }
            }
            escrow.transactions.0.extend(releases);
            escrow.status = Status::Released;
        }
        // Settled leaves the escrow state as-is for administrative follow-up.
        DisputeResolution::Settled => {}
    }

    escrow.dispute_status = Some(resolution.into());
    escrow.dispute_resolved_at = Some(now);
    escrow.updated_at = Some(now);
    Ok(())
}
