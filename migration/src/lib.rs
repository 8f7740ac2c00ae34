pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_freelancer_profiles_table;
mod m20250601_000003_create_projects_table;
mod m20250601_000004_create_proposals_table;
mod m20250601_000005_create_escrows_table;
mod m20250601_000006_create_matches_table;
mod m20250602_000001_add_marketplace_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_freelancer_profiles_table::Migration),
            Box::new(m20250601_000003_create_projects_table::Migration),
            Box::new(m20250601_000004_create_proposals_table::Migration),
            Box::new(m20250601_000005_create_escrows_table::Migration),
            Box::new(m20250601_000006_create_matches_table::Migration),
            Box::new(m20250602_000001_add_marketplace_indexes::Migration),
        ]
    }
}
