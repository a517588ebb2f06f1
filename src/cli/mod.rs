pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Campus CLI - inspect route policy, event timestamps and session tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the access decision the request gate makes for paths")]
    Route(commands::route::RouteArgs),

    #[command(about = "Compose a date and a clock time into an event timestamp")]
    Compose(commands::compose::ComposeArgs),

    #[command(about = "Validate an event start/end pair the way submissions are checked")]
    Validate(commands::validate::ValidateArgs),

    #[command(about = "Mint a session token signed with the configured secret")]
    Token(commands::token::TokenArgs),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Route(args) => commands::route::handle(args, output_format),
        Commands::Compose(args) => commands::compose::handle(args, output_format),
        Commands::Validate(args) => commands::validate::handle(args, output_format),
        Commands::Token(args) => commands::token::handle(args, output_format),
    }
}
