use sea_orm::prelude::DateTimeUtc;
use sea_orm::*;
use uuid::Uuid;

use crate::matching::MatchFactors;
use crate::models::matches;

/// Create or update the match row for a (project, freelancer) pair.
///
/// The overall score is derived from the factors on every persist, so the
/// stored `match_score` always agrees with the stored factor columns.
/// Returns the persisted row and whether it was newly created.
pub async fn upsert_match(
    db: &DatabaseConnection,
    project_id: Uuid,
    freelancer_id: Uuid,
    factors: MatchFactors,
    is_recommended: Option<bool>,
) -> Result<(matches::Model, bool), DbErr> {
    let now = chrono::Utc::now();
    let score = factors.overall();

    let existing = matches::Entity::find()
        .filter(matches::Column::ProjectId.eq(project_id))
        .filter(matches::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let mut active: matches::ActiveModel = row.into();
            active.skills_match = Set(factors.skills_match);
            active.experience_match = Set(factors.experience_match);
            active.rate_match = Set(factors.rate_match);
            active.location_match = Set(factors.location_match);
            active.availability_match = Set(factors.availability_match);
            active.past_performance_match = Set(factors.past_performance_match);
            active.client_preference_match = Set(factors.client_preference_match);
            active.match_score = Set(score);
            if let Some(recommended) = is_recommended {
                active.is_recommended = Set(recommended);
            }
            active.updated_at = Set(Some(now));
            Ok((active.update(db).await?, false))
        }
        None => {
            let new_match = matches::ActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(project_id),
                freelancer_id: Set(freelancer_id),
                skills_match: Set(factors.skills_match),
                experience_match: Set(factors.experience_match),
                rate_match: Set(factors.rate_match),
                location_match: Set(factors.location_match),
                availability_match: Set(factors.availability_match),
                past_performance_match: Set(factors.past_performance_match),
                client_preference_match: Set(factors.client_preference_match),
                match_score: Set(score),
                is_recommended: Set(is_recommended.unwrap_or(false)),
                is_viewed: Set(false),
                viewed_at: Set(None),
                is_saved: Set(false),
                saved_at: Set(None),
                is_applied: Set(false),
                applied_at: Set(None),
                application_id: Set(None),
                created_at: Set(now),
                updated_at: Set(None),
            };
            Ok((new_match.insert(db).await?, true))
        }
    }
}

/// Fetch a single match by ID.
pub async fn get_match_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<matches::Model>, DbErr> {
    matches::Entity::find_by_id(id).one(db).await
}

/// Matches for a project at or above a minimum score, best first.
pub async fn get_matches_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
    min_score: i32,
    page: u64,
    limit: u64,
) -> Result<Vec<matches::Model>, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::ProjectId.eq(project_id))
        .filter(matches::Column::MatchScore.gte(min_score))
        .order_by_desc(matches::Column::MatchScore)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Matches for a freelancer at or above a minimum score, best first.
pub async fn get_matches_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
    min_score: i32,
    page: u64,
    limit: u64,
) -> Result<Vec<matches::Model>, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::FreelancerId.eq(freelancer_id))
        .filter(matches::Column::MatchScore.gte(min_score))
        .order_by_desc(matches::Column::MatchScore)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Record the first view of a match. Later views leave the timestamp alone.
pub async fn mark_viewed(
    db: &DatabaseConnection,
    row: matches::Model,
) -> Result<matches::Model, DbErr> {
    if row.is_viewed {
        return Ok(row);
    }
    let now = chrono::Utc::now();
    let mut active: matches::ActiveModel = row.into();
    active.is_viewed = Set(true);
    active.viewed_at = Set(Some(now));
    active.updated_at = Set(Some(now));
    active.update(db).await
}

/// Build the save-toggle update. `saved_at` is stamped only on the
/// toggle-to-false transition; clients read it as "when was this last
/// un-saved".
pub fn toggle_saved_update(row: matches::Model, now: DateTimeUtc) -> matches::ActiveModel {
    let was_saved = row.is_saved;
    let mut active: matches::ActiveModel = row.into();
    active.is_saved = Set(!was_saved);
    if was_saved {
        active.saved_at = Set(Some(now));
    }
    active.updated_at = Set(Some(now));
    active
}

/// Toggle the saved flag.
pub async fn toggle_saved(
    db: &DatabaseConnection,
    row: matches::Model,
) -> Result<matches::Model, DbErr> {
    toggle_saved_update(row, chrono::Utc::now()).update(db).await
}

/// Record that the freelancer applied, linking their proposal when one
/// already exists for the pair.
pub async fn mark_applied(
    db: &DatabaseConnection,
    row: matches::Model,
    application_id: Option<Uuid>,
) -> Result<matches::Model, DbErr> {
    let now = chrono::Utc::now();
    let mut active: matches::ActiveModel = row.into();
    active.is_applied = Set(true);
    active.applied_at = Set(Some(now));
    if let Some(proposal_id) = application_id {
        active.application_id = Set(Some(proposal_id));
    }
    active.updated_at = Set(Some(now));
    active.update(db).await
}
