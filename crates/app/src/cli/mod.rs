use clap::{Parser, Subcommand};

mod catalog;
mod db;

#[derive(Debug, Parser)]
#[command(name = "hotel-app", about = "Hotel reservations admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Catalog(catalog::CatalogCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Catalog(command) => catalog::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_nested_subcommands() -> TestResult {
        for args in [
            ["hotel-app", "db", "migrate"],
            ["hotel-app", "catalog", "seed"],
            ["hotel-app", "catalog", "list"],
        ] {
            Cli::try_parse_from(args)?;
        }

        Ok(())
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["hotel-app", "guest", "create"]).is_err());
    }
}
