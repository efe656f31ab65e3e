//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Loomsight - textile manufacturing dashboard backend
#[derive(Parser)]
#[command(name = "loomsight")]
#[command(about = "Textile manufacturing dashboard backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Directory with the dashboard front-end files
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Print the current dashboard metrics
    Dashboard,

    /// Request a one-off predictive insight
    Insight {
        /// Print the raw JSON result instead of formatted output
        #[arg(long)]
        json: bool,
    },
}
