use clap::{Args, Subcommand};
use hotel_app::{
    database::{self, DatabaseConfig, Db},
    domain::rooms::PgRoomsService,
};

mod list;
mod seed;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Install the standard room types and rooms
    Seed(seed::SeedArgs),

    /// Print every room with its room type
    List(list::ListArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Seed(args) => seed::run(args).await,
        CatalogSubcommand::List(args) => list::run(args).await,
    }
}

async fn rooms_service(config: &DatabaseConfig) -> Result<PgRoomsService, String> {
    let pool = database::connect(config)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgRoomsService::new(Db::new(pool)))
}
