use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chanbot")]
#[command(author, version, about = "Telegram bot for managing channels and groups from inline menus", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default when no subcommand is given)
    Run,

    /// Run the bot in staging mode (loads .env.staging over .env)
    RunStaging,

    /// Print the registered channels and groups from the data file
    Inspect {
        /// Print the raw document as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
