use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, Professions, UpsertProfile};

/// Fetch a freelancer's provider profile.
pub async fn get_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(user_id).one(db).await
}

/// Create or update a freelancer's provider profile.
pub async fn upsert_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: UpsertProfile,
) -> Result<profiles::Model, DbErr> {
    let now = chrono::Utc::now();

    match profiles::Entity::find_by_id(user_id).one(db).await? {
        Some(existing) => {
            let mut active: profiles::ActiveModel = existing.into();
            if let Some(professions) = input.professions {
                active.professions = Set(Professions(professions));
            }
            if let Some(years) = input.experience_years {
                active.experience_years = Set(years);
            }
            if let Some(earnings) = input.total_earnings {
                active.total_earnings = Set(earnings);
            }
            if let Some(rating) = input.rating {
                active.rating = Set(rating);
            }
            if let Some(available) = input.available {
                active.available = Set(available);
            }
            if let Some(state) = input.state {
                active.state = Set(Some(state));
            }
            active.updated_at = Set(Some(now));
            active.update(db).await
        }
        None => {
            let new_profile = profiles::ActiveModel {
                user_id: Set(user_id),
                professions: Set(Professions(input.professions.unwrap_or_default())),
                experience_years: Set(input.experience_years.unwrap_or(0)),
                total_earnings: Set(input.total_earnings.unwrap_or(0.0)),
                rating: Set(input.rating.unwrap_or(0.0)),
                available: Set(input.available.unwrap_or(true)),
                state: Set(input.state),
                created_at: Set(now),
                updated_at: Set(None),
            };
            new_profile.insert(db).await
        }
    }
}
