use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::escrows as escrow_db;
use crate::db::projects as project_db;
use crate::models::users::{self, Roles};
use crate::models::{escrows, projects};

fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(serde_json::json!({
        "success": false,
        "message": message,
    }))
}

fn not_found(message: String) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": message,
    }))
}

fn db_error(e: sea_orm::DbErr) -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "success": false,
        "message": format!("Database error: {e}"),
    }))
}

/// Only admins may run batch jobs and resolve disputes.
pub fn require_admin(user: &users::Model) -> Result<(), HttpResponse> {
    match user.role {
        Roles::Admin => Ok(()),
        Roles::Client | Roles::Freelancer => {
            Err(forbidden("This action requires an admin account"))
        }
    }
}

/// Only freelancer-type accounts may submit proposals or list their matches.
pub fn require_freelancer(user: &users::Model) -> Result<(), HttpResponse> {
    match user.role {
        Roles::Freelancer => Ok(()),
        Roles::Client | Roles::Admin => {
            Err(forbidden("This action requires a freelancer account"))
        }
    }
}

/// Fetch a project and verify the caller owns it.
pub async fn verify_project_client(
    db: &DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<projects::Model, HttpResponse> {
    let project = project_db::get_project_by_id(db, project_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Project {project_id} not found")))?;

    if project.client_id != user_id {
        return Err(forbidden("Only the project's client can perform this action"));
    }

    Ok(project)
}

/// Fetch an escrow and verify the caller is its client.
pub async fn verify_escrow_client(
    db: &DatabaseConnection,
    escrow_id: Uuid,
    user_id: Uuid,
) -> Result<escrows::Model, HttpResponse> {
    let escrow = escrow_db::get_escrow_by_id(db, escrow_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Escrow {escrow_id} not found")))?;

    if escrow.client_id != user_id {
        return Err(forbidden("Only the escrow's client can perform this action"));
    }

    Ok(escrow)
}

/// Fetch an escrow and verify the caller is one of its parties.
pub async fn verify_escrow_party(
    db: &DatabaseConnection,
    escrow_id: Uuid,
    user_id: Uuid,
) -> Result<escrows::Model, HttpResponse> {
    let escrow = escrow_db::get_escrow_by_id(db, escrow_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(format!("Escrow {escrow_id} not found")))?;

    if escrow.client_id != user_id && escrow.freelancer_id != user_id {
        return Err(forbidden("You are not a party to this escrow"));
    }

    Ok(escrow)
}
