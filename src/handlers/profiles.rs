use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_freelancer;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::profiles as profile_db;
use crate::models::profiles::{UpsertProfile, validate_profile};

/// PUT /api/profiles/me — create or update the caller's provider profile.
///
/// Only freelancer accounts carry a profile; the match scorer reads it.
pub async fn upsert_my_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpsertProfile>,
) -> impl Responder {
    if let Err(resp) = require_freelancer(&user.0) {
        return resp;
    }

    let input = body.into_inner();
    if let Err(e) = validate_profile(&input) {
        return super::bad_request(e.to_string());
    }

    match profile_db::upsert_profile(db.get_ref(), user.0.id, input).await {
        Ok(profile) => super::success(StatusCode::OK, profile, "Profile saved"),
        Err(e) => super::db_error(e),
    }
}

/// GET /api/profiles/{user_id} — fetch a freelancer's provider profile.
pub async fn get_profile(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let user_id = path.into_inner();

    match profile_db::get_profile(db.get_ref(), user_id).await {
        Ok(Some(profile)) => super::success(StatusCode::OK, profile, "Profile fetched"),
        Ok(None) => super::not_found(format!("No freelancer profile for user {user_id}")),
        Err(e) => super::db_error(e),
    }
}
