use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::projects::MilestonePlan;

/// Escrow status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "funded")]
    Funded,
    #[sea_orm(string_value = "partially-released")]
    PartiallyReleased,
    #[sea_orm(string_value = "released")]
    Released,
    #[sea_orm(string_value = "refunded")]
    Refunded,
    #[sea_orm(string_value = "disputed")]
    Disputed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Pending => "pending",
            Status::Funded => "funded",
            Status::PartiallyReleased => "partially-released",
            Status::Released => "released",
            Status::Refunded => "refunded",
            Status::Disputed => "disputed",
        };
        f.write_str(s)
    }
}

/// Per-milestone funding status, embedded inside the JSONB milestone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Pending,
    Funded,
    Released,
    Disputed,
}

/// An escrow milestone: a funding slice of the total amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub due_date: Option<DateTimeUtc>,
    pub status: MilestoneStatus,
    pub funded_at: Option<DateTimeUtc>,
    pub released_at: Option<DateTimeUtc>,
}

impl Milestone {
    /// Build a pending escrow milestone from a project milestone plan.
    pub fn from_plan(plan: MilestonePlan) -> Self {
        Self {
            title: plan.title,
            description: plan.description,
            amount: plan.amount,
            due_date: plan.due_date,
            status: MilestoneStatus::Pending,
            funded_at: None,
            released_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Milestones(pub Vec<Milestone>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Fund,
    Release,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// A ledger entry. The derived released/remaining amounts are recomputed
/// from completed entries on every read, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: DateTimeUtc,
    pub reference: Option<String>,
    pub status: TransactionStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Transactions(pub Vec<Transaction>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum DisputeStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "client-favor")]
    ClientFavor,
    #[sea_orm(string_value = "freelancer-favor")]
    FreelancerFavor,
    #[sea_orm(string_value = "settled")]
    Settled,
}

/// SeaORM entity for the `escrows` table.
///
/// Created once, at proposal acceptance or directly via the API, mutated by
/// fund/release/dispute/resolve operations, never deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "escrows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,
    pub currency: String,
    pub payment_type: String,
    pub status: Status,
    #[sea_orm(column_type = "JsonBinary")]
    pub milestones: Milestones,
    #[sea_orm(column_type = "JsonBinary")]
    pub transactions: Transactions,
    pub dispute_reason: Option<String>,
    pub dispute_status: Option<DisputeStatus>,
    pub dispute_resolved_at: Option<DateTimeUtc>,
    pub expiry_date: DateTimeUtc,
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
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/projects/{project_id}/escrow.
/// Everything is optional — defaults come from the project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEscrow {
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_type: Option<String>,
    pub milestones: Option<Vec<MilestonePlan>>,
}

/// Request body for POST /api/escrows/{id}/fund.
/// With `milestone_index` the amount must equal that milestone's amount;
/// without it the amount must equal the escrow total.
#[derive(Debug, Clone, Deserialize)]
pub struct FundEscrow {
    pub amount: f64,
    pub milestone_index: Option<usize>,
    pub reference: Option<String>,
}

/// Request body for POST /api/escrows/{id}/release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseFunds {
    pub milestone_index: usize,
    pub reference: Option<String>,
}

/// Request body for POST /api/escrows/{id}/dispute.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateDispute {
    pub reason: String,
}

/// How an admin resolves a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisputeResolution {
    ClientFavor,
    FreelancerFavor,
    Settled,
}

impl From<DisputeResolution> for DisputeStatus {
    fn from(r: DisputeResolution) -> Self {
        match r {
            DisputeResolution::ClientFavor => DisputeStatus::ClientFavor,
            DisputeResolution::FreelancerFavor => DisputeStatus::FreelancerFavor,
            DisputeResolution::Settled => DisputeStatus::Settled,
        }
    }
}

/// Request body for POST /api/escrows/{id}/resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveDispute {
    pub resolution: DisputeResolution,
    pub notes: Option<String>,
}

/// Escrow representation for API responses, with the ledger-derived amounts
/// attached.
#[derive(Debug, Clone, Serialize)]
pub struct EscrowResponse {
    #[serde(flatten)]
    pub escrow: Model,
    pub released_amount: f64,
    pub remaining_amount: f64,
}

impl From<Model> for EscrowResponse {
    fn from(escrow: Model) -> Self {
        let released_amount = escrow.released_amount();
        let remaining_amount = escrow.remaining_amount();
        Self {
            escrow,
            released_amount,
            remaining_amount,
        }
    }
}
