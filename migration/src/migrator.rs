use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608150001_create_users::Migration),
            Box::new(migrations::m202608150002_create_tasks::Migration),
            Box::new(migrations::m202608150003_create_forms::Migration),
            Box::new(migrations::m202608150004_create_errors::Migration),
            Box::new(migrations::m202608150005_create_checks::Migration),
            Box::new(migrations::m202608150006_create_planned_checks::Migration),
        ]
    }
}
