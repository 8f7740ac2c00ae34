use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `projects` table and its columns.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    ClientId,
    Title,
    Description,
    Category,
    Skills,
    BudgetMin,
    BudgetMax,
    Currency,
    PaymentType,
    Duration,
    ExperienceLevel,
    Status,
    Visibility,
    FreelancerId,
    EscrowId,
    Milestones,
    StartDate,
    CompletionDate,
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
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(ColumnDef::new(Projects::Category).string().not_null())
                    .col(ColumnDef::new(Projects::Skills).json_binary().not_null())
                    .col(ColumnDef::new(Projects::BudgetMin).double().not_null())
                    .col(ColumnDef::new(Projects::BudgetMax).double().not_null())
                    .col(ColumnDef::new(Projects::Currency).string().not_null())
                    .col(ColumnDef::new(Projects::PaymentType).string().not_null())
                    .col(ColumnDef::new(Projects::Duration).string().not_null())
                    .col(ColumnDef::new(Projects::ExperienceLevel).string().not_null())
                    .col(ColumnDef::new(Projects::Status).string().not_null())
                    .col(ColumnDef::new(Projects::Visibility).string().not_null())
                    .col(ColumnDef::new(Projects::FreelancerId).uuid())
                    .col(ColumnDef::new(Projects::EscrowId).uuid())
                    .col(ColumnDef::new(Projects::Milestones).json_binary().not_null())
                    .col(ColumnDef::new(Projects::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Projects::CompletionDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_client_id")
                            .from(Projects::Table, Projects::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_freelancer_id")
                            .from(Projects::Table, Projects::FreelancerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}
