use clap::Args;
use qrcodes_app::database;

use crate::cli::CLI_MAX_CONNECTIONS;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, CLI_MAX_CONNECTIONS)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    #[expect(clippy::print_stdout, reason = "reports the command's result")]
    {
        println!("migrations applied");
    }

    Ok(())
}
