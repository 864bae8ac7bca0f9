use sea_orm_migration::prelude::*;

use nutrilife_api_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
