use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `escrows` table and its columns.
#[derive(DeriveIden)]
enum Escrows {
    Table,
    Id,
    ProjectId,
    ClientId,
    FreelancerId,
    TotalAmount,
    Currency,
    PaymentType,
    Status,
    Milestones,
    Transactions,
    DisputeReason,
    DisputeStatus,
    DisputeResolvedAt,
    ExpiryDate,
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
                    .table(Escrows::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Escrows::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Escrows::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Escrows::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Escrows::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(Escrows::TotalAmount).double().not_null())
                    .col(ColumnDef::new(Escrows::Currency).string().not_null())
                    .col(ColumnDef::new(Escrows::PaymentType).string().not_null())
                    .col(ColumnDef::new(Escrows::Status).string().not_null())
                    .col(ColumnDef::new(Escrows::Milestones).json_binary().not_null())
                    .col(
                        ColumnDef::new(Escrows::Transactions)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Escrows::DisputeReason).text())
                    .col(ColumnDef::new(Escrows::DisputeStatus).string())
                    .col(ColumnDef::new(Escrows::DisputeResolvedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Escrows::ExpiryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Escrows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Escrows::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_escrows_project_id")
                            .from(Escrows::Table, Escrows::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_escrows_client_id")
                            .from(Escrows::Table, Escrows::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_escrows_freelancer_id")
                            .from(Escrows::Table, Escrows::FreelancerId)
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
            .drop_table(Table::drop().table(Escrows::Table).to_owned())
            .await
    }
}
