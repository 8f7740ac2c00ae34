use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project lifecycle status stored as a lowercase string in the database.
///
/// Transitions are monotonic: open → in-progress → completed, with
/// cancellation possible from open or in-progress. Completed and cancelled
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Open => "open",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl Status {
    /// Whether a transition from `self` to `to` is allowed.
    pub fn can_transition_to(self, to: Status) -> bool {
        matches!(
            (self, to),
            (Status::Open, Status::InProgress)
                | (Status::Open, Status::Cancelled)
                | (Status::InProgress, Status::Completed)
                | (Status::InProgress, Status::Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentType {
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "hourly")]
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ExperienceLevel {
    #[sea_orm(string_value = "beginner")]
    Beginner,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "expert")]
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum DurationBucket {
    #[sea_orm(string_value = "less-than-1-month")]
    LessThanOneMonth,
    #[sea_orm(string_value = "1-3-months")]
    OneToThreeMonths,
    #[sea_orm(string_value = "3-6-months")]
    ThreeToSixMonths,
    #[sea_orm(string_value = "more-than-6-months")]
    MoreThanSixMonths,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Visibility {
    #[sea_orm(string_value = "public")]
    Public,
    #[sea_orm(string_value = "private")]
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Categories {
    #[sea_orm(string_value = "web_development")]
    WebDevelopment,
    #[sea_orm(string_value = "mobile_development")]
    MobileDevelopment,
    #[sea_orm(string_value = "data_science")]
    DataScience,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "video_editing")]
    VideoEditing,
    #[sea_orm(string_value = "content_writing")]
    ContentWriting,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Required skills for a project, stored as a JSONB array of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Skills(pub Vec<String>);

/// A planned milestone on a project. When a proposal is accepted these are
/// copied into the escrow as its funding breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MilestonePlan {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub due_date: Option<DateTimeUtc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Milestones(pub Vec<MilestonePlan>);

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Categories,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: Skills,
    #[sea_orm(column_type = "Double")]
    pub budget_min: f64,
    #[sea_orm(column_type = "Double")]
    pub budget_max: f64,
    pub currency: String,
    pub payment_type: PaymentType,
    pub duration: DurationBucket,
    pub experience_level: ExperienceLevel,
    pub status: Status,
    pub visibility: Visibility,
    /// Set exactly once, at proposal acceptance, and never cleared.
    pub freelancer_id: Option<Uuid>,
    pub escrow_id: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary")]
    pub milestones: Milestones,
    pub start_date: Option<DateTimeUtc>,
    pub completion_date: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl Model {
    /// Midpoint of the budget range, used by the rate-match heuristic.
    pub fn average_budget(&self) -> f64 {
        (self.budget_min + self.budget_max) / 2.0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub category: Option<Categories>,
    pub skills: Option<Vec<String>>,
    pub budget_min: f64,
    pub budget_max: f64,
    pub currency: Option<String>,
    pub payment_type: PaymentType,
    pub duration: DurationBucket,
    pub experience_level: ExperienceLevel,
    pub visibility: Option<Visibility>,
    pub milestones: Option<Vec<MilestonePlan>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectStatus {
    pub status: Status,
}
