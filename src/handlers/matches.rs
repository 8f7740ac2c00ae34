use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_admin, require_freelancer, verify_project_client};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, keys, ttl};
use crate::db::matches as match_db;
use crate::db::profiles as profile_db;
use crate::db::projects as project_db;
use crate::db::proposals as proposal_db;
use crate::db::users as user_db;
use crate::matching;
use crate::models::matches::{
    self, MatchAction, MatchListQuery, MatchWithProposal, RecommendationSummary,
    UpdateMatchStatus,
};
use crate::models::users::Roles;

/// POST /api/projects/{project_id}/freelancers/{freelancer_id}/match —
/// compute (or recompute) the compatibility score for a pair. Idempotent:
/// the existing match row is updated in place.
pub async fn calculate_match(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (project_id, freelancer_id) = path.into_inner();

    let project = match project_db::get_project_by_id(db.get_ref(), project_id).await {
        Ok(Some(p)) => p,
        Ok(None) => return super::not_found(format!("Project {project_id} not found")),
        Err(e) => return super::db_error(e),
    };

    // The candidate must be a freelancer-type account with a provider profile.
    let candidate = match user_db::get_user_by_id(db.get_ref(), freelancer_id).await {
        Ok(Some(u)) if u.role == Roles::Freelancer => u,
        Ok(_) => return super::not_found(format!("Freelancer {freelancer_id} not found")),
        Err(e) => return super::db_error(e),
    };
    let profile = match profile_db::get_profile(db.get_ref(), candidate.id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return super::not_found(format!("Freelancer {freelancer_id} has no profile"));
        }
        Err(e) => return super::db_error(e),
    };

    // The location factor compares against the project client's state.
    let client_state = match user_db::get_user_by_id(db.get_ref(), project.client_id).await {
        Ok(Some(client)) => client.state,
        Ok(None) => None,
        Err(e) => return super::db_error(e),
    };

    let factors = matching::compute_factors(&project, client_state.as_deref(), &profile);

    match match_db::upsert_match(db.get_ref(), project_id, freelancer_id, factors, None).await {
        Ok((row, _created)) => {
            let _ = cache
                .delete_pattern(&keys::project_matches_pattern(project_id))
                .await;
            let _ = cache
                .delete_pattern(&keys::freelancer_matches_pattern(freelancer_id))
                .await;
            super::success(StatusCode::OK, row, "Match calculated")
        }
        Err(e) => super::internal(format!("Failed to persist match: {e}")),
    }
}

/// Attach the candidate's proposal status to each match, when a proposal
/// exists for the pair.
async fn enrich_with_proposals(
    db: &DatabaseConnection,
    rows: Vec<matches::Model>,
) -> Result<Vec<MatchWithProposal>, sea_orm::DbErr> {
    let mut enriched = Vec::with_capacity(rows.len());
    for entry in rows {
        let proposal_status =
            proposal_db::find_by_pair(db, entry.project_id, entry.freelancer_id)
                .await?
                .map(|p| p.status);
        enriched.push(MatchWithProposal {
            entry,
            proposal_status,
        });
    }
    Ok(enriched)
}

/// GET /api/projects/{project_id}/matches?minScore=&page=&limit= — the
/// client's view of candidates, best score first.
pub async fn get_project_matches(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    query: web::Query<MatchListQuery>,
) -> impl Responder {
    let project_id = path.into_inner();

    if let Err(resp) = verify_project_client(db.get_ref(), project_id, user.0.id).await {
        return resp;
    }

    let (min_score, page, limit) = (query.min_score(), query.page(), query.limit());
    let cache_key = keys::project_matches(project_id, min_score, page, limit);
    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return super::success(StatusCode::OK, cached, "Matches fetched");
    }

    let rows = match match_db::get_matches_by_project(db.get_ref(), project_id, min_score, page, limit)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return super::db_error(e),
    };

    match enrich_with_proposals(db.get_ref(), rows).await {
        Ok(enriched) => {
            let _ = cache.set(&cache_key, &enriched, Some(ttl::MATCH_LIST)).await;
            super::success(StatusCode::OK, enriched, "Matches fetched")
        }
        Err(e) => super::db_error(e),
    }
}

/// GET /api/my-matches?minScore=&page=&limit= — the freelancer's view of
/// recommended projects, best score first.
pub async fn get_freelancer_matches(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    query: web::Query<MatchListQuery>,
) -> impl Responder {
    if let Err(resp) = require_freelancer(&user.0) {
        return resp;
    }

    let (min_score, page, limit) = (query.min_score(), query.page(), query.limit());
    let cache_key = keys::freelancer_matches(user.0.id, min_score, page, limit);
    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return super::success(StatusCode::OK, cached, "Matches fetched");
    }

    let rows = match match_db::get_matches_by_freelancer(
        db.get_ref(),
        user.0.id,
        min_score,
        page,
        limit,
    )
    .await
    {
        Ok(rows) => rows,
        Err(e) => return super::db_error(e),
    };

    match enrich_with_proposals(db.get_ref(), rows).await {
        Ok(enriched) => {
            let _ = cache.set(&cache_key, &enriched, Some(ttl::MATCH_LIST)).await;
            super::success(StatusCode::OK, enriched, "Matches fetched")
        }
        Err(e) => super::db_error(e),
    }
}

/// PATCH /api/matches/{id}/status {action: view|save|apply} — flip the
/// engagement flags on a match. Only the match's freelancer or the project's
/// client may act on it.
pub async fn update_match_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMatchStatus>,
) -> impl Responder {
    let match_id = path.into_inner();

    let row = match match_db::get_match_by_id(db.get_ref(), match_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return super::not_found(format!("Match {match_id} not found")),
        Err(e) => return super::db_error(e),
    };

    // Authorization: the match's freelancer, or the match's project's client.
    if row.freelancer_id != user.0.id {
        let project = match project_db::get_project_by_id(db.get_ref(), row.project_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                return super::not_found("The project for this match no longer exists");
            }
            Err(e) => return super::db_error(e),
        };
        if project.client_id != user.0.id {
            return super::forbidden("You are not a participant in this match");
        }
    }

    let (project_id, freelancer_id) = (row.project_id, row.freelancer_id);
    let result = match body.action {
        MatchAction::View => match_db::mark_viewed(db.get_ref(), row).await,
        MatchAction::Save => match_db::toggle_saved(db.get_ref(), row).await,
        MatchAction::Apply => {
            let application_id =
                match proposal_db::find_by_pair(db.get_ref(), project_id, freelancer_id).await {
                    Ok(existing) => existing.map(|p| p.id),
                    Err(e) => return super::db_error(e),
                };
            match_db::mark_applied(db.get_ref(), row, application_id).await
        }
    };

    match result {
        Ok(updated) => {
            let _ = cache
                .delete_pattern(&keys::project_matches_pattern(project_id))
                .await;
            let _ = cache
                .delete_pattern(&keys::freelancer_matches_pattern(freelancer_id))
                .await;
            super::success(StatusCode::OK, updated, "Match status updated")
        }
        Err(e) => super::internal(format!("Failed to update match: {e}")),
    }
}

/// POST /api/generate-recommendations — admin batch job scoring every open
/// project against every freelancer with a provider profile.
///
/// Partial-failure tolerant: one bad pair is logged and skipped, never
/// aborting the batch.
pub async fn generate_recommendations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    let open_projects = match project_db::get_all_open_projects(db.get_ref()).await {
        Ok(list) => list,
        Err(e) => return super::db_error(e),
    };
    let freelancers = match user_db::get_freelancers(db.get_ref()).await {
        Ok(list) => list,
        Err(e) => return super::db_error(e),
    };

    // Prefetch profiles once; candidates without one are skipped per pair.
    let mut candidates = Vec::with_capacity(freelancers.len());
    for freelancer in freelancers {
        match profile_db::get_profile(db.get_ref(), freelancer.id).await {
            Ok(profile) => candidates.push((freelancer, profile)),
            Err(e) => return super::db_error(e),
        }
    }

    let mut summary = RecommendationSummary::default();

    for project in &open_projects {
        let client_state = match user_db::get_user_by_id(db.get_ref(), project.client_id).await {
            Ok(Some(client)) => client.state,
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(project_id = %project.id, "skipping project: {e}");
                continue;
            }
        };

        for (freelancer, profile) in &candidates {
            let Some(profile) = profile else {
                summary.skipped += 1;
                continue;
            };

            let factors = matching::compute_factors(project, client_state.as_deref(), profile);
            let recommended = matching::is_recommended(&factors);

            match match_db::upsert_match(
                db.get_ref(),
                project.id,
                freelancer.id,
                factors,
                Some(recommended),
            )
            .await
            {
                Ok((_, true)) => summary.created += 1,
                Ok((_, false)) => summary.updated += 1,
                Err(e) => {
                    tracing::warn!(
                        project_id = %project.id,
                        freelancer_id = %freelancer.id,
                        "failed to upsert match: {e}"
                    );
                    summary.skipped += 1;
                }
            }
        }
    }

    let _ = cache.delete_pattern("matches:*").await;

    super::success(StatusCode::OK, summary, "Recommendations generated")
}
