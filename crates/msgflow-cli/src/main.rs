//! msgflow CLI
//!
//! Command-line interface for msgflow

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use msgflow_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "msgflow")]
#[command(about = "msgflow - Message flow diagrams and docs from AsyncAPI specs", long_about = None)]
struct Cli {
    /// Logging profile (development or production)
    #[arg(long, global = true, default_value = "development")]
    log_profile: Profile,

    /// Path to the d2 executable
    #[arg(long, global = true, default_value = "d2")]
    d2_bin: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate one view from AsyncAPI files
    GenSchema(commands::gen_schema::GenSchemaArgs),
    /// Generate diagrams, README and changelog for AsyncAPI files
    GenDocs(commands::gen_docs::GenDocsArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match cli.command {
        Commands::GenSchema(args) => commands::gen_schema::execute(args, &cli.d2_bin),
        Commands::GenDocs(args) => commands::gen_docs::execute(args, &cli.d2_bin),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
