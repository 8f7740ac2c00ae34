use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{
    require_admin, verify_escrow_client, verify_escrow_party, verify_project_client,
};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::escrows as escrow_db;
use crate::db::projects as project_db;
use crate::escrow;
use crate::models::escrows::{
    CreateEscrow, EscrowResponse, FundEscrow, InitiateDispute, ReleaseFunds, ResolveDispute,
};
use crate::models::users::Roles;

/// POST /api/projects/{project_id}/escrow — the client sets up an escrow
/// directly, outside the accept cascade. The project needs an assigned
/// freelancer and must not already carry an escrow.
pub async fn create_escrow(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CreateEscrow>,
) -> impl Responder {
    let project_id = path.into_inner();

    let project = match verify_project_client(db.get_ref(), project_id, user.0.id).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let Some(freelancer_id) = project.freelancer_id else {
        return super::bad_request("Project has no assigned freelancer");
    };
    // Checked against the escrows table rather than project.escrow_id, so an
    // escrow that was created but never linked still blocks a duplicate.
    match escrow_db::get_escrow_by_project(db.get_ref(), project.id).await {
        Ok(Some(_)) => return super::bad_request("Project already has an escrow"),
        Ok(None) => {}
        Err(e) => return super::db_error(e),
    }

    let input = body.into_inner();
    let escrow_model = escrow::build_escrow(
        project.id,
        project.client_id,
        freelancer_id,
        input.total_amount.unwrap_or(project.budget_max),
        input.currency.unwrap_or_else(|| project.currency.clone()),
        input
            .payment_type
            .unwrap_or_else(|| "traditional".to_string()),
        input.milestones.unwrap_or_else(|| project.milestones.0.clone()),
        chrono::Utc::now(),
    );

    let escrow_row = match escrow_db::insert_escrow(db.get_ref(), escrow_model).await {
        Ok(row) => row,
        Err(e) => return super::internal(format!("Failed to create escrow: {e}")),
    };
    if let Err(e) = project_db::attach_escrow(db.get_ref(), project.id, escrow_row.id).await {
        return super::internal(format!("Failed to link escrow: {e}"));
    }

    super::success(
        StatusCode::CREATED,
        EscrowResponse::from(escrow_row),
        "Escrow created",
    )
}

/// GET /api/escrows/{id} — either party (or an admin) reads the escrow,
/// with the ledger-derived amounts attached.
pub async fn get_escrow(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let escrow_id = path.into_inner();

    let escrow_row = if user.0.role == Roles::Admin {
        match escrow_db::get_escrow_by_id(db.get_ref(), escrow_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return super::not_found(format!("Escrow {escrow_id} not found")),
            Err(e) => return super::db_error(e),
        }
    } else {
        match verify_escrow_party(db.get_ref(), escrow_id, user.0.id).await {
            Ok(row) => row,
            Err(resp) => return resp,
        }
    };

    super::success(
        StatusCode::OK,
        EscrowResponse::from(escrow_row),
        "Escrow fetched",
    )
}

/// POST /api/escrows/{id}/fund — the client funds one milestone (exact
/// amount) or the whole escrow (amount equal to the total).
pub async fn fund_escrow(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<FundEscrow>,
) -> impl Responder {
    let escrow_id = path.into_inner();

    let mut escrow_row = match verify_escrow_client(db.get_ref(), escrow_id, user.0.id).await {
        Ok(row) => row,
        Err(resp) => return resp,
    };

    let input = body.into_inner();
    if let Err(e) = escrow::fund(
        &mut escrow_row,
        input.amount,
        input.milestone_index,
        input.reference,
    ) {
        return super::bad_request(e.to_string());
    }

    let project_id = escrow_row.project_id;
    let saved = match escrow_db::save_state(db.get_ref(), escrow_row).await {
        Ok(row) => row,
        Err(e) => return super::internal(format!("Failed to persist escrow: {e}")),
    };

    // Funding may arrive before proposal acceptance has moved the project
    // along; promote an open project to in-progress.
    if let Err(e) = project_db::mark_in_progress(db.get_ref(), project_id).await {
        tracing::warn!(%project_id, "could not promote project after funding: {e}");
    }

    super::success(StatusCode::OK, EscrowResponse::from(saved), "Escrow funded")
}

/// POST /api/escrows/{id}/release — the client releases a funded milestone.
/// Releasing the last one completes the parent project.
pub async fn release_funds(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ReleaseFunds>,
) -> impl Responder {
    let escrow_id = path.into_inner();

    let mut escrow_row = match verify_escrow_client(db.get_ref(), escrow_id, user.0.id).await {
        Ok(row) => row,
        Err(resp) => return resp,
    };

    let input = body.into_inner();
    let fully_released =
        match escrow::release(&mut escrow_row, input.milestone_index, input.reference) {
            Ok(done) => done,
            Err(e) => return super::bad_request(e.to_string()),
        };

    let project_id = escrow_row.project_id;
    let saved = match escrow_db::save_state(db.get_ref(), escrow_row).await {
        Ok(row) => row,
        Err(e) => return super::internal(format!("Failed to persist escrow: {e}")),
    };

    if fully_released {
        if let Err(e) = project_db::mark_completed(db.get_ref(), project_id).await {
            tracing::warn!(%project_id, "could not complete project after release: {e}");
        }
    }

    super::success(StatusCode::OK, EscrowResponse::from(saved), "Funds released")
}

/// POST /api/escrows/{id}/dispute — either party opens a dispute.
pub async fn initiate_dispute(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<InitiateDispute>,
) -> impl Responder {
    let escrow_id = path.into_inner();

    let mut escrow_row = match verify_escrow_party(db.get_ref(), escrow_id, user.0.id).await {
        Ok(row) => row,
        Err(resp) => return resp,
    };

    if let Err(e) = escrow::initiate_dispute(&mut escrow_row, body.into_inner().reason) {
        return super::bad_request(e.to_string());
    }

    match escrow_db::save_state(db.get_ref(), escrow_row).await {
        Ok(saved) => super::success(
            StatusCode::OK,
            EscrowResponse::from(saved),
            "Dispute opened",
        ),
        Err(e) => super::internal(format!("Failed to persist escrow: {e}")),
    }
}

/// POST /api/escrows/{id}/resolve — an admin resolves an open dispute.
pub async fn resolve_dispute(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ResolveDispute>,
) -> impl Responder {
    let escrow_id = path.into_inner();

    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let mut escrow_row = match escrow_db::get_escrow_by_id(db.get_ref(), escrow_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return super::not_found(format!("Escrow {escrow_id} not found")),
        Err(e) => return super::db_error(e),
    };

    let input = body.into_inner();
    if let Err(e) = escrow::resolve_dispute(&mut escrow_row, input.resolution) {
        return super::bad_request(e.to_string());
    }
    if let Some(notes) = &input.notes {
        tracing::info!(%escrow_id, notes, "dispute resolution notes");
    }

    match escrow_db::save_state(db.get_ref(), escrow_row).await {
        Ok(saved) => super::success(
            StatusCode::OK,
            EscrowResponse::from(saved),
            "Dispute resolved",
        ),
        Err(e) => super::internal(format!("Failed to persist escrow: {e}")),
    }
}
