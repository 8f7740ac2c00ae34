use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `matches` table and its columns.
#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
    ProjectId,
    FreelancerId,
    SkillsMatch,
    ExperienceMatch,
    RateMatch,
    LocationMatch,
    AvailabilityMatch,
    PastPerformanceMatch,
    ClientPreferenceMatch,
    MatchScore,
    IsRecommended,
    IsViewed,
    ViewedAt,
    IsSaved,
    SavedAt,
    IsApplied,
    AppliedAt,
    ApplicationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Matches::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Matches::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(Matches::SkillsMatch).integer().not_null())
                    .col(ColumnDef::new(Matches::ExperienceMatch).integer().not_null())
                    .col(ColumnDef::new(Matches::RateMatch).integer().not_null())
                    .col(ColumnDef::new(Matches::LocationMatch).integer().not_null())
                    .col(
                        ColumnDef::new(Matches::AvailabilityMatch)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::PastPerformanceMatch)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::ClientPreferenceMatch)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::MatchScore).integer().not_null())
                    .col(ColumnDef::new(Matches::IsRecommended).boolean().not_null())
                    .col(ColumnDef::new(Matches::IsViewed).boolean().not_null())
                    .col(ColumnDef::new(Matches::ViewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Matches::IsSaved).boolean().not_null())
                    .col(ColumnDef::new(Matches::SavedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Matches::IsApplied).boolean().not_null())
                    .col(ColumnDef::new(Matches::AppliedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Matches::ApplicationId).uuid())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_project_id")
                            .from(Matches::Table, Matches::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_freelancer_id")
                            .from(Matches::Table, Matches::FreelancerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}
