use clap::{Parser, Subcommand};

mod db;
mod session;

/// Pool size for one-shot admin commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

#[derive(Debug, Parser)]
#[command(name = "qrcodes-app", about = "QR codes admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Session(session::SessionCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Session(command) => session::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
