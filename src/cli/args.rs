//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Multi-user to-do list web application
#[derive(Parser, Debug)]
#[command(name = "todo-app")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}
