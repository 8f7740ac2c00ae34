use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `proposals` table and its columns.
#[derive(DeriveIden)]
enum Proposals {
    Table,
    Id,
    ProjectId,
    FreelancerId,
    CoverLetter,
    BidAmount,
    BidType,
    Currency,
    EstimatedDuration,
    Milestones,
    Status,
    AcceptedAt,
    RejectedAt,
    WithdrawnAt,
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
                    .table(Proposals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Proposals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Proposals::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Proposals::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(Proposals::CoverLetter).text().not_null())
                    .col(ColumnDef::new(Proposals::BidAmount).double().not_null())
                    .col(ColumnDef::new(Proposals::BidType).string().not_null())
                    .col(ColumnDef::new(Proposals::Currency).string().not_null())
                    .col(ColumnDef::new(Proposals::EstimatedDuration).string())
                    .col(ColumnDef::new(Proposals::Milestones).json_binary().not_null())
                    .col(ColumnDef::new(Proposals::Status).string().not_null())
                    .col(ColumnDef::new(Proposals::AcceptedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Proposals::RejectedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Proposals::WithdrawnAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Proposals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Proposals::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_proposals_project_id")
                            .from(Proposals::Table, Proposals::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_proposals_freelancer_id")
                            .from(Proposals::Table, Proposals::FreelancerId)
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
            .drop_table(Table::drop().table(Proposals::Table).to_owned())
            .await
    }
}
