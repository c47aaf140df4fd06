//! Applies or rolls back the blog schema.
//!
//! Reads `DATABASE_URL` from the environment or `.env`. The CLI installs its
//! own log subscriber, so none is set up here.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
