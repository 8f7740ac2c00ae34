pub mod auth;
pub mod escrows;
pub mod matches;
pub mod profiles;
pub mod projects;
pub mod proposals;
pub mod users;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;

/// Success envelope: `{statusCode, data, message}`.
pub fn success(status: StatusCode, data: impl Serialize, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "statusCode": status.as_u16(),
        "data": data,
        "message": message,
    }))
}

/// Error envelope: `{success: false, message}`.
pub fn failure(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "message": message.into(),
    }))
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    failure(StatusCode::BAD_REQUEST, message)
}

pub fn forbidden(message: impl Into<String>) -> HttpResponse {
    failure(StatusCode::FORBIDDEN, message)
}

pub fn not_found(message: impl Into<String>) -> HttpResponse {
    failure(StatusCode::NOT_FOUND, message)
}

pub fn internal(message: impl Into<String>) -> HttpResponse {
    failure(StatusCode::INTERNAL_SERVER_ERROR, message)
}

pub fn db_error(e: sea_orm::DbErr) -> HttpResponse {
    internal(format!("Database error: {e}"))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/complete-profile", web::post().to(auth::complete_profile)),
    );

    // ── User routes ──
    cfg.service(web::resource("/users").route(web::get().to(users::get_users)));
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user)),
    );

    // ── Freelancer provider profiles ──
    cfg.service(web::resource("/profiles/me").route(web::put().to(profiles::upsert_my_profile)));
    cfg.service(
        web::resource("/profiles/{user_id}").route(web::get().to(profiles::get_profile)),
    );

    // ── Project routes ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_open_projects))
            .route("", web::post().to(projects::create_project))
            .route("/mine", web::get().to(projects::get_my_projects))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}/status", web::patch().to(projects::update_status))
            .route(
                "/{project_id}/proposals",
                web::post().to(proposals::submit_proposal),
            )
            .route(
                "/{project_id}/proposals",
                web::get().to(proposals::get_proposals_by_project),
            )
            .route(
                "/{project_id}/escrow",
                web::post().to(escrows::create_escrow),
            )
            .route(
                "/{project_id}/matches",
                web::get().to(matches::get_project_matches),
            )
            .route(
                "/{project_id}/freelancers/{freelancer_id}/match",
                web::post().to(matches::calculate_match),
            ),
    );

    // ── Proposal routes ──
    cfg.service(
        web::scope("/proposals")
            .route("/mine", web::get().to(proposals::get_my_proposals))
            .route("/{id}", web::patch().to(proposals::update_proposal))
            .route("/{id}/status", web::patch().to(proposals::update_status))
            .route("/{id}/withdraw", web::patch().to(proposals::withdraw)),
    );

    // ── Escrow routes ──
    cfg.service(
        web::scope("/escrows")
            .route("/{id}", web::get().to(escrows::get_escrow))
            .route("/{id}/fund", web::post().to(escrows::fund_escrow))
            .route("/{id}/release", web::post().to(escrows::release_funds))
            .route("/{id}/dispute", web::post().to(escrows::initiate_dispute))
            .route("/{id}/resolve", web::post().to(escrows::resolve_dispute)),
    );

    // ── Match routes ──
    cfg.service(web::resource("/my-matches").route(web::get().to(matches::get_freelancer_matches)));
    cfg.service(
        web::resource("/matches/{id}/status")
            .route(web::patch().to(matches::update_match_status)),
    );
    cfg.service(
        web::resource("/generate-recommendations")
            .route(web::post().to(matches::generate_recommendations)),
    );
}
