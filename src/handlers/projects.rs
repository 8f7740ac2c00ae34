use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_project_client;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, keys, ttl};
use crate::db::projects as project_db;
use crate::models::PaginationQuery;
use crate::models::projects::{self, CreateProject, UpdateProjectStatus, Visibility};
use crate::models::users::Roles;

/// POST /api/projects — a client posts a new project.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateProject>,
) -> impl Responder {
    let input = body.into_inner();

    if input.budget_min > input.budget_max {
        return super::bad_request("budget.minAmount must not exceed budget.maxAmount");
    }
    if input.budget_min < 0.0 {
        return super::bad_request("budget.minAmount must not be negative");
    }

    match project_db::insert_project(db.get_ref(), user.0.id, input).await {
        Ok(project) => {
            let _ = cache.delete_pattern("projects:open:*").await;
            super::success(StatusCode::CREATED, project, "Project created")
        }
        Err(e) => super::internal(format!("Failed to create project: {e}")),
    }
}

/// GET /api/projects — list publicly visible open projects, newest first.
pub async fn get_open_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let page = query.page();
    let limit = query.limit();
    let cache_key = keys::open_projects(page, limit);

    if let Ok(Some(cached)) = cache.get::<Vec<projects::Model>>(&cache_key).await {
        return super::success(StatusCode::OK, cached, "Projects fetched");
    }

    match project_db::get_open_projects(db.get_ref(), page, limit).await {
        Ok(list) => {
            let _ = cache.set(&cache_key, &list, Some(ttl::PROJECT_LIST)).await;
            super::success(StatusCode::OK, list, "Projects fetched")
        }
        Err(e) => super::db_error(e),
    }
}

/// GET /api/projects/mine — the caller's own projects.
pub async fn get_my_projects(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match project_db::get_projects_by_client(db.get_ref(), user.0.id).await {
        Ok(list) => super::success(StatusCode::OK, list, "Projects fetched"),
        Err(e) => super::db_error(e),
    }
}

/// GET /api/projects/{id} — fetch a single project.
///
/// Private projects are visible only to the client, the assigned freelancer
/// and admins.
pub async fn get_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let project = match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => return super::not_found(format!("Project {id} not found")),
        Err(e) => return super::db_error(e),
    };

    if project.visibility == Visibility::Private {
        let caller = user.0.id;
        let is_party = project.client_id == caller || project.freelancer_id == Some(caller);
        if !is_party && user.0.role != Roles::Admin {
            return super::forbidden("This project is private");
        }
    }

    super::success(StatusCode::OK, project, "Project fetched")
}

/// PATCH /api/projects/{id}/status — client moves the project along its
/// lifecycle. Transitions are monotonic; completed and cancelled are final.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProjectStatus>,
) -> impl Responder {
    let id = path.into_inner();

    let project = match verify_project_client(db.get_ref(), id, user.0.id).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let target = body.status;
    if !project.status.can_transition_to(target) {
        return super::bad_request(format!(
            "Cannot change project status from {} to {}",
            project.status, target
        ));
    }

    match project_db::update_status(db.get_ref(), id, target).await {
        Ok(updated) => {
            let _ = cache.delete_pattern("projects:open:*").await;
            super::success(StatusCode::OK, updated, "Project status updated")
        }
        Err(e) => super::internal(format!("Failed to update project status: {e}")),
    }
}
