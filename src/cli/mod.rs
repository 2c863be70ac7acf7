//! CLI module for the ETL Insight API
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API (default mode)
//! - `seed`: insert sample workflows and logs for local development

pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

/// ETL Insight API - AI-assisted analysis of ETL workflow error logs
#[derive(Parser)]
#[command(name = "etl-insight-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Insert sample workflows and logs into the configured store
    Seed,
}
