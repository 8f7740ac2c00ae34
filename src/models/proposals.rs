use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::projects::{self, MilestonePlan, PaymentType};

/// Proposal status stored as a lowercase string in the database.
///
/// Pending is the only non-terminal state; accepted, rejected and withdrawn
/// are all terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Pending => "pending",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
            Status::Withdrawn => "withdrawn",
        };
        f.write_str(s)
    }
}

/// Milestones the freelancer proposes, stored as a JSONB array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Milestones(pub Vec<MilestonePlan>);

/// SeaORM entity for the `proposals` table.
///
/// A unique index on (project_id, freelancer_id) enforces one proposal per
/// freelancer per project; a partial unique index on project_id where
/// status = 'accepted' enforces at most one accepted proposal per project.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proposals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub cover_letter: String,
    #[sea_orm(column_type = "Double")]
    pub bid_amount: f64,
    pub bid_type: PaymentType,
    pub currency: String,
    pub estimated_duration: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub milestones: Milestones,
    pub status: Status,
    pub accepted_at: Option<DateTimeUtc>,
    pub rejected_at: Option<DateTimeUtc>,
    pub withdrawn_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── Bid validation ──

#[derive(Debug, Error, PartialEq)]
pub enum ProposalError {
    #[error("Bid amount must be between {min} and {max}")]
    BidOutOfRange { min: f64, max: f64 },
    #[error("Bid type must match the project's payment type")]
    BidTypeMismatch,
}

/// Validate a bid against the project's budget range and payment type.
/// Applied on submission and again when a pending proposal's bid is edited.
pub fn validate_bid(
    project: &projects::Model,
    bid_amount: f64,
    bid_type: PaymentType,
) -> Result<(), ProposalError> {
    if bid_amount < project.budget_min || bid_amount > project.budget_max {
        return Err(ProposalError::BidOutOfRange {
            min: project.budget_min,
            max: project.budget_max,
        });
    }
    if bid_type != project.payment_type {
        return Err(ProposalError::BidTypeMismatch);
    }
    Ok(())
}

// ── DTOs ──

/// Request body for POST /api/projects/{project_id}/proposals.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitProposal {
    pub cover_letter: String,
    pub bid_amount: f64,
    pub bid_type: PaymentType,
    pub currency: Option<String>,
    pub estimated_duration: Option<String>,
    pub milestones: Option<Vec<MilestonePlan>>,
}

/// Content edit on a pending proposal (author only).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProposal {
    pub cover_letter: Option<String>,
    pub bid_amount: Option<f64>,
    pub estimated_duration: Option<String>,
    pub milestones: Option<Vec<MilestonePlan>>,
}

/// Request body for PATCH /api/proposals/{id}/status (client accept/reject).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProposalStatus {
    pub status: Status,
}
