use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    form::FormSeeder, planned_check::PlannedCheckSeeder, task::TaskSeeder, user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    {
        let config = common::config::AppConfig::global();
        common::logger::init_logger(&config.log_level, &config.log_file, config.log_to_stdout);
    }
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(TaskSeeder), "Task"),
        (Box::new(FormSeeder), "Form"),
        (Box::new(PlannedCheckSeeder), "PlannedCheck"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
