use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "converge")]
#[command(
    author,
    version,
    about = "Backend service and toolkit for the converge.zone site"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write structured logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the demo-request HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8787, env = "PORT")]
        port: u16,
    },

    /// Validate a Converge rules file
    #[command(visible_alias = "check")]
    Validate {
        /// Path to the rules file
        file: String,

        /// Skip the runtime API and use only the local checks
        #[arg(long)]
        local: bool,

        /// Ask the runtime to include LLM-assisted checks
        #[arg(long)]
        use_llm: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Signals (blog) content
    Signals {
        #[command(subcommand)]
        command: SignalsCommands,
    },

    /// Stored demo requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommands,
    },

    /// Check the Converge runtime's health and readiness
    Health,

    /// Page through the scripted pitch transcript
    Pitch {
        /// Lines per page
        #[arg(long, default_value_t = 20)]
        lines: usize,
    },
}

#[derive(Subcommand)]
pub enum SignalsCommands {
    /// List all articles
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one article by slug
    Show {
        /// Article slug
        slug: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum RequestsCommands {
    /// List stored demo requests
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
