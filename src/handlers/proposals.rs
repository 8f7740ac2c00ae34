use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_freelancer, verify_project_client};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::escrows as escrow_db;
use crate::db::projects as project_db;
use crate::db::proposals as proposal_db;
use crate::escrow;
use crate::models::projects;
use crate::models::proposals::{
    Status, SubmitProposal, UpdateProposal, UpdateProposalStatus, validate_bid,
};

/// POST /api/projects/{project_id}/proposals — a freelancer submits a proposal.
///
/// The project must still be open, the freelancer must not have proposed
/// before, and the bid must fit the project's budget range and payment type.
pub async fn submit_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SubmitProposal>,
) -> impl Responder {
    let project_id = path.into_inner();
    let freelancer_id = user.0.id;

    if let Err(resp) = require_freelancer(&user.0) {
        return resp;
    }

    // 1. The project must exist and be open for proposals.
    let project = match project_db::get_project_by_id(db.get_ref(), project_id).await {
        Ok(Some(p)) => p,
        Ok(None) => return super::not_found(format!("Project {project_id} not found")),
        Err(e) => return super::db_error(e),
    };
    if project.status != projects::Status::Open {
        return super::bad_request("Project is not open for proposals");
    }

    // 2. One proposal per freelancer per project.
    match proposal_db::find_by_pair(db.get_ref(), project_id, freelancer_id).await {
        Ok(Some(_)) => {
            return super::bad_request("You have already submitted a proposal for this project");
        }
        Ok(None) => {}
        Err(e) => return super::db_error(e),
    }

    // 3. The bid must fit the project.
    let input = body.into_inner();
    if let Err(e) = validate_bid(&project, input.bid_amount, input.bid_type) {
        return super::bad_request(e.to_string());
    }

    // 4. Create the proposal.
    match proposal_db::insert_proposal(
        db.get_ref(),
        project_id,
        freelancer_id,
        project.currency,
        input,
    )
    .await
    {
        Ok(proposal) => super::success(StatusCode::CREATED, proposal, "Proposal submitted"),
        Err(e) => super::internal(format!("Failed to create proposal: {e}")),
    }
}

/// GET /api/projects/{project_id}/proposals — the client lists proposals on
/// their project.
pub async fn get_proposals_by_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();

    if let Err(resp) = verify_project_client(db.get_ref(), project_id, user.0.id).await {
        return resp;
    }

    match proposal_db::get_proposals_by_project(db.get_ref(), project_id).await {
        Ok(list) => super::success(StatusCode::OK, list, "Proposals fetched"),
        Err(e) => super::db_error(e),
    }
}

/// GET /api/proposals/mine — the freelancer's own proposals.
pub async fn get_my_proposals(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(resp) = require_freelancer(&user.0) {
        return resp;
    }

    match proposal_db::get_proposals_by_freelancer(db.get_ref(), user.0.id).await {
        Ok(list) => super::success(StatusCode::OK, list, "Proposals fetched"),
        Err(e) => super::db_error(e),
    }
}

/// PATCH /api/proposals/{id}/status — the project's client accepts or
/// rejects a pending proposal.
///
/// Acceptance is a multi-entity cascade. The writes are sequential (the
/// document store gives us no cross-entity transaction), ordered so that the
/// most failure-prone step — escrow creation — happens before any project or
/// proposal mutation is committed. A crash partway can still leave a
/// transiently inconsistent state; the proposal stays pending until the very
/// last step, so the accept is retryable.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProposalStatus>,
) -> impl Responder {
    let proposal_id = path.into_inner();
    let target = body.status;

    if target != Status::Accepted && target != Status::Rejected {
        return super::bad_request("Status must be accepted or rejected");
    }

    // 1. Fetch the proposal and authorize the caller as the project's client.
    let proposal = match proposal_db::get_proposal_by_id(db.get_ref(), proposal_id).await {
        Ok(Some(p)) => p,
        Ok(None) => return super::not_found(format!("Proposal {proposal_id} not found")),
        Err(e) => return super::db_error(e),
    };

    let project = match verify_project_client(db.get_ref(), proposal.project_id, user.0.id).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    // 2. Only pending proposals can change status.
    if proposal.status != Status::Pending {
        return super::bad_request(format!(
            "Proposal is already {}. Only pending proposals can be updated.",
            proposal.status
        ));
    }

    if target == Status::Rejected {
        return match proposal_db::update_status(db.get_ref(), proposal_id, Status::Rejected).await
        {
            Ok(updated) => super::success(StatusCode::OK, updated, "Proposal rejected"),
            Err(e) => super::internal(format!("Failed to reject proposal: {e}")),
        };
    }

    // ── Accept cascade ──

    // 3. At most one proposal per project may ever be accepted. The partial
    //    unique index on proposals(project_id) WHERE status = 'accepted' is
    //    the backstop for concurrent accepts.
    match proposal_db::has_accepted_proposal(db.get_ref(), proposal.project_id).await {
        Ok(true) => {
            return super::bad_request("Project already has an accepted proposal");
        }
        Ok(false) => {}
        Err(e) => return super::db_error(e),
    }

    // 4. Create the escrow first; if this fails the accept aborts with
    //    nothing else written.
    let escrow_model = escrow::build_escrow(
        project.id,
        project.client_id,
        proposal.freelancer_id,
        project.budget_max,
        "INR".to_string(),
        "traditional".to_string(),
        project.milestones.0.clone(),
        chrono::Utc::now(),
    );
    let escrow_row = match escrow_db::insert_escrow(db.get_ref(), escrow_model).await {
        Ok(row) => row,
        Err(e) => return super::internal(format!("Failed to create escrow: {e}")),
    };

    // 5. Assign the freelancer and move the project to in-progress.
    if let Err(e) =
        project_db::assign_freelancer(db.get_ref(), project.id, proposal.freelancer_id).await
    {
        return super::internal(format!("Failed to update project: {e}"));
    }
    if let Err(e) = project_db::attach_escrow(db.get_ref(), project.id, escrow_row.id).await {
        return super::internal(format!("Failed to link escrow: {e}"));
    }

    // 6. Reject every other pending proposal on the project.
    if let Err(e) =
        proposal_db::reject_other_pending(db.get_ref(), project.id, proposal_id).await
    {
        return super::internal(format!("Failed to reject sibling proposals: {e}"));
    }

    // 7. Finally mark this proposal accepted.
    match proposal_db::update_status(db.get_ref(), proposal_id, Status::Accepted).await {
        Ok(accepted) => super::success(
            StatusCode::OK,
            serde_json::json!({
                "proposal": accepted,
                "escrow": escrow_row,
            }),
            "Proposal accepted",
        ),
        Err(e) => super::internal(format!("Failed to accept proposal: {e}")),
    }
}

/// PATCH /api/proposals/{id}/withdraw — the author withdraws a pending
/// proposal. Terminal.
pub async fn withdraw(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let proposal_id = path.into_inner();

    let proposal = match proposal_db::get_proposal_by_id(db.get_ref(), proposal_id).await {
        Ok(Some(p)) => p,
        Ok(None) => return super::not_found(format!("Proposal {proposal_id} not found")),
        Err(e) => return super::db_error(e),
    };

    if proposal.freelancer_id != user.0.id {
        return super::forbidden("You can only withdraw your own proposals");
    }
    if proposal.status != Status::Pending {
        return super::bad_request(format!(
            "Proposal is already {}. Only pending proposals can be withdrawn.",
            proposal.status
        ));
    }

    match proposal_db::update_status(db.get_ref(), proposal_id, Status::Withdrawn).await {
        Ok(updated) => super::success(StatusCode::OK, updated, "Proposal withdrawn"),
        Err(e) => super::internal(format!("Failed to withdraw proposal: {e}")),
    }
}

/// PATCH /api/proposals/{id} — the author edits a pending proposal. A
/// changed bid is re-validated against the project's budget range.
pub async fn update_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProposal>,
) -> impl Responder {
    let proposal_id = path.into_inner();

    let proposal = match proposal_db::get_proposal_by_id(db.get_ref(), proposal_id).await {
        Ok(Some(p)) => p,
        Ok(None) => return super::not_found(format!("Proposal {proposal_id} not found")),
        Err(e) => return super::db_error(e),
    };

    if proposal.freelancer_id != user.0.id {
        return super::forbidden("You can only edit your own proposals");
    }
    if proposal.status != Status::Pending {
        return super::bad_request(format!(
            "Proposal is already {}. Only pending proposals can be edited.",
            proposal.status
        ));
    }

    let input = body.into_inner();
    if let Some(new_bid) = input.bid_amount {
        let project = match project_db::get_project_by_id(db.get_ref(), proposal.project_id).await
        {
            Ok(Some(p)) => p,
            Ok(None) => {
                return super::not_found("The project for this proposal no longer exists");
            }
            Err(e) => return super::db_error(e),
        };
        if let Err(e) = validate_bid(&project, new_bid, proposal.bid_type) {
            return super::bad_request(e.to_string());
        }
    }

    match proposal_db::update_content(db.get_ref(), proposal_id, input).await {
        Ok(updated) => super::success(StatusCode::OK, updated, "Proposal updated"),
        Err(e) => super::internal(format!("Failed to update proposal: {e}")),
    }
}
