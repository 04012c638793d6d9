pub use sea_orm_migration::prelude::*;

mod m20260105_081204_create_table_users;
mod m20260105_083517_create_table_phd_scholar;
mod m20260112_140322_create_table_certificate;
mod m20260120_091045_create_table_collaboration;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_081204_create_table_users::Migration),
            Box::new(m20260105_083517_create_table_phd_scholar::Migration),
            Box::new(m20260112_140322_create_table_certificate::Migration),
            Box::new(m20260120_091045_create_table_collaboration::Migration),
        ]
    }
}
