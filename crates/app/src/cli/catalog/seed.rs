use clap::Args;
use hotel_app::{database::DatabaseConfig, domain::rooms::catalog::Catalog};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let service = super::rooms_service(&args.database).await?;

    let summary = service
        .install_catalog(&Catalog::standard())
        .await
        .map_err(|error| format!("failed to install catalog: {error}"))?;

    println!("room_types_created: {}", summary.room_types);
    println!("rooms_created: {}", summary.rooms);

    Ok(())
}
