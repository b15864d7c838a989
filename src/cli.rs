use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Educational mini-games for children, played from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "MindKids")]
#[command(about = "Educational mini-games, child profiles and progress reports", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, global = true, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, global = true, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        global = true,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in with any email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Sign out
    Logout,
    /// Activate premium access for the signed-in account
    Upgrade,
    /// Show the signed-in account
    Whoami,
    /// List child profiles
    Profiles,
    /// Create a child profile
    CreateProfile {
        name: String,
    },
    /// List the available games
    Games,
    /// Play a game for a profile
    Play {
        /// Game slug (memory, pattern, color, shape, number, sound)
        game: String,
        /// Profile name
        #[arg(long)]
        profile: String,
        /// Skip the feedback pauses
        #[arg(long)]
        fast: bool,
    },
    /// Show a profile's report, optionally exporting the printable version
    Report {
        profile: String,
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },
    /// Ask Luna, the help assistant
    Chat,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }
}
