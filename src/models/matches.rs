use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `matches` table.
///
/// One row per (project, freelancer) pair — recomputing factors updates the
/// existing row rather than duplicating it (unique index on the pair).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    pub skills_match: i32,
    pub experience_match: i32,
    pub rate_match: i32,
    pub location_match: i32,
    pub availability_match: i32,
    pub past_performance_match: i32,
    pub client_preference_match: i32,
    /// Derived on every persist from the factor columns, never supplied by
    /// the caller.
    pub match_score: i32,
    pub is_recommended: bool,
    pub is_viewed: bool,
    pub viewed_at: Option<DateTimeUtc>,
    pub is_saved: bool,
    pub saved_at: Option<DateTimeUtc>,
    pub is_applied: bool,
    pub applied_at: Option<DateTimeUtc>,
    /// Links to the freelancer's proposal once they apply.
    pub application_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchAction {
    View,
    Save,
    Apply,
}

/// Request body for PATCH /api/matches/{id}/status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMatchStatus {
    pub action: MatchAction,
}

/// Query params for the match list endpoints: ?minScore=&page=&limit=
#[derive(Debug, Clone, Deserialize)]
pub struct MatchListQuery {
    #[serde(alias = "minScore")]
    pub min_score: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl MatchListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }

    pub fn min_score(&self) -> i32 {
        self.min_score.unwrap_or(0)
    }
}

/// A match enriched with the candidate's proposal status for the same
/// (project, freelancer) pair, if one exists.
#[derive(Debug, Clone, Serialize)]
pub struct MatchWithProposal {
    #[serde(flatten)]
    pub entry: Model,
    pub proposal_status: Option<super::proposals::Status>,
}

/// Result counts for the recommendation batch job.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationSummary {
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
}
