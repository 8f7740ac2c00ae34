use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// List of professions/skills a freelancer offers, stored as a JSONB array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Professions(pub Vec<String>);

/// SeaORM entity for the `freelancer_profiles` table.
///
/// One row per freelancer-type user. Candidates without a profile row are
/// skipped by the recommendation batch, since the scorer has nothing to go on.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "freelancer_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub professions: Professions,
    pub experience_years: i32,
    #[sea_orm(column_type = "Double")]
    pub total_earnings: f64,
    /// Average client rating, 0.0–5.0. Zero means unrated.
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub available: bool,
    pub state: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for PUT /api/profiles/me (create-or-update).
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfile {
    pub professions: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub total_earnings: Option<f64>,
    pub rating: Option<f64>,
    pub available: Option<bool>,
    pub state: Option<String>,
}

// ── Input validation ──

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Rating must be between 0 and 5")]
    RatingOutOfRange,
    #[error("Experience years must not be negative")]
    NegativeExperience,
    #[error("Total earnings must not be negative")]
    NegativeEarnings,
}

/// Validate profile input before persisting. The match scorer assumes a
/// 0–5 rating and non-negative years/earnings; bad input would otherwise
/// push factor scores outside the 0–100 range.
pub fn validate_profile(input: &UpsertProfile) -> Result<(), ProfileError> {
    if let Some(rating) = input.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ProfileError::RatingOutOfRange);
        }
    }
    if let Some(years) = input.experience_years {
        if years < 0 {
            return Err(ProfileError::NegativeExperience);
        }
    }
    if let Some(earnings) = input.total_earnings {
        if earnings < 0.0 {
            return Err(ProfileError::NegativeEarnings);
        }
    }
    Ok(())
}
