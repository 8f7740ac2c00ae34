use sea_orm::prelude::DateTimeUtc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::proposals::{self, Milestones, Status, SubmitProposal, UpdateProposal};

/// Insert a new proposal (defaults to Pending status).
pub async fn insert_proposal(
    db: &DatabaseConnection,
    project_id: Uuid,
    freelancer_id: Uuid,
    currency: String,
    input: SubmitProposal,
) -> Result<proposals::Model, DbErr> {
    let new_proposal = proposals::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        freelancer_id: Set(freelancer_id),
        cover_letter: Set(input.cover_letter),
        bid_amount: Set(input.bid_amount),
        bid_type: Set(input.bid_type),
        currency: Set(input.currency.unwrap_or(currency)),
        estimated_duration: Set(input.estimated_duration),
        milestones: Set(Milestones(input.milestones.unwrap_or_default())),
        status: Set(Status::Pending),
        accepted_at: Set(None),
        rejected_at: Set(None),
        withdrawn_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_proposal.insert(db).await
}

/// Fetch a single proposal by ID.
pub async fn get_proposal_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find_by_id(id).one(db).await
}

/// Fetch all proposals on a project, newest first.
pub async fn get_proposals_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all proposals authored by a freelancer, newest first.
pub async fn get_proposals_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the proposal for a (project, freelancer) pair, if any.
/// The pair is unique, so at most one row can exist.
pub async fn find_by_pair(
    db: &DatabaseConnection,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await
}

/// Whether the project already has an accepted proposal.
pub async fn has_accepted_proposal(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<bool, DbErr> {
    let count = proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::Status.eq(Status::Accepted))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Move a pending proposal into a terminal state, stamping the matching
/// transition timestamp.
pub async fn update_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
) -> Result<proposals::Model, DbErr> {
    let proposal = proposals::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Proposal not found".to_string()))?;

    let now = chrono::Utc::now();
    let mut active: proposals::ActiveModel = proposal.into();
    active.status = Set(status);
    match status {
        Status::Accepted => active.accepted_at = Set(Some(now)),
        Status::Rejected => active.rejected_at = Set(Some(now)),
        Status::Withdrawn => active.withdrawn_at = Set(Some(now)),
        Status::Pending => {}
    }
    active.updated_at = Set(Some(now));

    active.update(db).await
}

/// Build the bulk update that rejects every other pending proposal on a
/// project, leaving the accepted one and any terminal siblings untouched.
pub fn reject_other_pending_query(
    project_id: Uuid,
    accepted_proposal_id: Uuid,
    now: DateTimeUtc,
) -> UpdateMany<proposals::Entity> {
    proposals::Entity::update_many()
        .col_expr(proposals::Column::Status, Expr::value(Status::Rejected))
        .col_expr(proposals::Column::RejectedAt, Expr::value(Some(now)))
        .col_expr(proposals::Column::UpdatedAt, Expr::value(Some(now)))
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::Id.ne(accepted_proposal_id))
        .filter(proposals::Column::Status.eq(Status::Pending))
}

/// Bulk-reject every other pending proposal on the project. Part of the
/// accept cascade; returns how many siblings were rejected.
pub async fn reject_other_pending(
    db: &DatabaseConnection,
    project_id: Uuid,
    accepted_proposal_id: Uuid,
) -> Result<u64, DbErr> {
    let result = reject_other_pending_query(project_id, accepted_proposal_id, chrono::Utc::now())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Apply a content edit to a pending proposal (bid re-validation happens in
/// the handler before this is called).
pub async fn update_content(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProposal,
) -> Result<proposals::Model, DbErr> {
    let proposal = proposals::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Proposal not found".to_string()))?;

    let mut active: proposals::ActiveModel = proposal.into();
    if let Some(cover_letter) = input.cover_letter {
        active.cover_letter = Set(cover_letter);
    }
    if let Some(bid_amount) = input.bid_amount {
        active.bid_amount = Set(bid_amount);
    }
    if let Some(estimated_duration) = input.estimated_duration {
        active.estimated_duration = Set(Some(estimated_duration));
    }
    if let Some(milestones) = input.milestones {
        active.milestones = Set(Milestones(milestones));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
