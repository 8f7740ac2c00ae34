use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Proposals {
    Table,
    ProjectId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Matches {
    Table,
    ProjectId,
    FreelancerId,
    MatchScore,
}

#[derive(DeriveIden)]
enum Escrows {
    Table,
    ProjectId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One proposal per freelancer per project.
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_project_freelancer_unique")
                    .table(Proposals::Table)
                    .col(Proposals::ProjectId)
                    .col(Proposals::FreelancerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // At most one accepted proposal per project. This partial unique
        // index is the correctness boundary for concurrent accepts — the
        // check-then-write in the handler cannot close the race on its own.
        // sea-query's index builder has no WHERE clause, so raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_proposals_one_accepted_per_project \
                 ON proposals (project_id) WHERE status = 'accepted'",
            )
            .await?;

        // One match row per (project, freelancer) pair.
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_project_freelancer_unique")
                    .table(Matches::Table)
                    .col(Matches::ProjectId)
                    .col(Matches::FreelancerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Match lists are read sorted by score within a project or freelancer.
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_project_score")
                    .table(Matches::Table)
                    .col(Matches::ProjectId)
                    .col(Matches::MatchScore)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_freelancer_score")
                    .table(Matches::Table)
                    .col(Matches::FreelancerId)
                    .col(Matches::MatchScore)
                    .to_owned(),
            )
            .await?;

        // Escrow lookup by project.
        manager
            .create_index(
                Index::create()
                    .name("idx_escrows_project_id")
                    .table(Escrows::Table)
                    .col(Escrows::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_proposals_project_freelancer_unique")
                    .table(Proposals::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_proposals_one_accepted_per_project")
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_matches_project_freelancer_unique")
                    .table(Matches::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_matches_project_score")
                    .table(Matches::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_matches_freelancer_score")
                    .table(Matches::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_escrows_project_id")
                    .table(Escrows::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
