use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "outreach")]
#[command(version, about = "Track company outreach and see who is due next.")]
pub struct CommandLine {
    /// SQLite database file
    #[arg(long, global = true, env = "OUTREACH_DB_PATH")]
    pub db: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show recent history and the next due communication per company
    #[command(alias = "d")]
    Dashboard {
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
        /// Evaluate as of this date (YYYY-MM-DD) instead of the local date
        #[arg(long)]
        today: Option<String>,
    },
    /// Manage the company registry
    #[command(subcommand)]
    Company(CompanyCommand),
    /// Manage a company's communication methods
    #[command(subcommand)]
    Method(MethodCommand),
    /// Record and browse completed communications
    #[command(subcommand)]
    Log(LogCommand),
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
    Add(CompanyArgs),
    List,
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: String,
    /// Days between required communications
    #[arg(long)]
    pub periodicity: u32,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub linkedin: String,
    /// Comma or semicolon separated
    #[arg(long, default_value = "")]
    pub emails: String,
    /// Comma or semicolon separated
    #[arg(long, default_value = "")]
    pub phones: String,
    #[arg(long, default_value = "")]
    pub comments: String,
}

#[derive(Subcommand, Debug)]
pub enum MethodCommand {
    Add {
        company: String,
        #[arg(long)]
        sequence: u8,
        #[arg(long)]
        name: String,
        #[arg(long)]
        mandatory: bool,
        #[arg(long, default_value = "")]
        description: String,
    },
    List {
        company: String,
    },
    Remove {
        id: String,
    },
    /// Install LinkedIn Post, LinkedIn Message, Email, Phone Call and Other
    Seed {
        company: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum LogCommand {
    Add {
        company: String,
        #[arg(long)]
        method: String,
        /// YYYY-MM-DD; defaults to the local date
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        company: String,
    },
    Remove {
        id: String,
    },
}
