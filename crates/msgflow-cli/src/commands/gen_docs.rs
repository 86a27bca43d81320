//! gen-docs command
//!
//! Usage: msgflow gen-docs --asyncapi-files <FILES> [--output <DIR>] [--title <TITLE>]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use msgflow_engine::commands::{generate_docs, DocsOptions};
use msgflow_store::{load_schema, split_paths};
use tokio_util::sync::CancellationToken;

use super::pick_target;

#[derive(Debug, Args)]
pub struct GenDocsArgs {
    /// Paths to AsyncAPI files separated by comma
    #[arg(long)]
    pub asyncapi_files: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// README title
    #[arg(long, default_value = "Message Flow")]
    pub title: String,
}

/// Execute gen-docs command
///
/// Ctrl-C cancels diagrams that have not started yet.
pub fn execute(args: GenDocsArgs, d2_bin: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let target = pick_target("d2", d2_bin)?;
    let schema = load_schema(&split_paths(&args.asyncapi_files))?;
    let options = DocsOptions::new(args.output).with_title(args.title);

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling");
                on_interrupt.cancel();
            }
        });

        generate_docs(schema, Arc::new(target), &options, cancel).await
    })?;

    println!(
        "✓ Documentation written to {} ({} diagrams, {} new changes)",
        options.output.display(),
        report.diagrams.len(),
        report.changes_len
    );

    Ok(())
}
