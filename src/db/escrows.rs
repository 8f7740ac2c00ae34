use sea_orm::*;
use uuid::Uuid;

use crate::models::escrows;

/// Persist a freshly built escrow (see `escrow::build_escrow`).
pub async fn insert_escrow(
    db: &DatabaseConnection,
    escrow: escrows::Model,
) -> Result<escrows::Model, DbErr> {
    let active = escrows::ActiveModel {
        id: Set(escrow.id),
        project_id: Set(escrow.project_id),
        client_id: Set(escrow.client_id),
        freelancer_id: Set(escrow.freelancer_id),
        total_amount: Set(escrow.total_amount),
        currency: Set(escrow.currency),
        payment_type: Set(escrow.payment_type),
        status: Set(escrow.status),
        milestones: Set(escrow.milestones),
        transactions: Set(escrow.transactions),
        dispute_reason: Set(escrow.dispute_reason),
        dispute_status: Set(escrow.dispute_status),
        dispute_resolved_at: Set(escrow.dispute_resolved_at),
        expiry_date: Set(escrow.expiry_date),
        created_at: Set(escrow.created_at),
        updated_at: Set(escrow.updated_at),
    };

    active.insert(db).await
}

/// Fetch a single escrow by ID.
pub async fn get_escrow_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<escrows::Model>, DbErr> {
    escrows::Entity::find_by_id(id).one(db).await
}

/// Fetch the escrow attached to a project, if any.
pub async fn get_escrow_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Option<escrows::Model>, DbErr> {
    escrows::Entity::find()
        .filter(escrows::Column::ProjectId.eq(project_id))
        .one(db)
        .await
}

/// Write back the mutable state after an engine transition: status,
/// milestone list, transaction ledger and the dispute fields.
pub async fn save_state(
    db: &DatabaseConnection,
    escrow: escrows::Model,
) -> Result<escrows::Model, DbErr> {
    let active = escrows::ActiveModel {
        id: Unchanged(escrow.id),
        status: Set(escrow.status),
        milestones: Set(escrow.milestones),
        transactions: Set(escrow.transactions),
        dispute_reason: Set(escrow.dispute_reason),
        dispute_status: Set(escrow.dispute_status),
        dispute_resolved_at: Set(escrow.dispute_resolved_at),
        updated_at: Set(escrow.updated_at),
        ..Default::default()
    };

    active.update(db).await
}
