use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `freelancer_profiles` table and its columns.
#[derive(DeriveIden)]
enum FreelancerProfiles {
    Table,
    UserId,
    Professions,
    ExperienceYears,
    TotalEarnings,
    Rating,
    Available,
    State,
    CreatedAt,
    UpdatedAt,
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
                    .table(FreelancerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreelancerProfiles::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::Professions)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::ExperienceYears)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::TotalEarnings)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreelancerProfiles::Rating).double().not_null())
                    .col(
                        ColumnDef::new(FreelancerProfiles::Available)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreelancerProfiles::State).string())
                    .col(
                        ColumnDef::new(FreelancerProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::UpdatedAt)
                            .timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freelancer_profiles_user_id")
                            .from(FreelancerProfiles::Table, FreelancerProfiles::UserId)
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
            .drop_table(Table::drop().table(FreelancerProfiles::Table).to_owned())
            .await
    }
}
