use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, keys, ttl};
use crate::db::users as user_db;
use crate::models::PaginationQuery;
use crate::models::users::{UpdateUser, UserResponse};

/// GET /api/users — list users with pagination (requires authentication).
/// Query params: ?page=1&limit=20
pub async fn get_users(
    _user: AuthenticatedUser, // ensures caller is authenticated
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let page = query.page();
    let limit = query.limit();

    match user_db::get_users_paginated(db.get_ref(), page, limit).await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            super::success(StatusCode::OK, response, "Users fetched")
        }
        Err(e) => super::db_error(e),
    }
}

/// GET /api/users/{id} — get a single user (requires authentication).
pub async fn get_user(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::user(&id.to_string());

    // Try the cache first; any cache failure falls back to the database.
    if let Ok(Some(cached)) = cache.get::<UserResponse>(&cache_key).await {
        return super::success(StatusCode::OK, cached, "User fetched");
    }

    match user_db::get_user_by_id(db.get_ref(), id).await {
        Ok(Some(user)) => {
            let response = UserResponse::from(user);
            let _ = cache.set(&cache_key, &response, Some(ttl::USER)).await;
            super::success(StatusCode::OK, response, "User fetched")
        }
        Ok(None) => super::not_found(format!("User {id} not found")),
        Err(e) => super::db_error(e),
    }
}

/// PUT /api/users/{id} — update a user (self only).
pub async fn update_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> impl Responder {
    let id = path.into_inner();

    if auth_user.0.id != id {
        return super::forbidden("You can only update your own account");
    }

    match user_db::update_user(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::user(&id.to_string())).await;
            super::success(StatusCode::OK, UserResponse::from(updated), "User updated")
        }
        Err(e) => super::internal(format!("Failed to update user: {e}")),
    }
}
