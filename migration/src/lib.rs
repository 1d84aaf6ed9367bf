pub use sea_orm_migration::prelude::*;

mod migrations;
mod migrator;

pub use migrator::Migrator;
