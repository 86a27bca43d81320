//! gen-schema command
//!
//! Usage: msgflow gen-schema --asyncapi-files <FILES> [--format-mode <MODE>]
//!        [--format-to-file <FILE>] [--render-to-file <FILE>]

use std::path::{Path, PathBuf};

use clap::Args;
use msgflow_core::{FormatMode, FormatOptions};
use msgflow_engine::commands::{generate_schema, SchemaRequest};
use msgflow_store::split_paths;

use super::pick_target;

#[derive(Debug, Args)]
pub struct GenSchemaArgs {
    /// Target type (d2)
    #[arg(long, default_value = "d2")]
    pub target: String,

    /// Paths to AsyncAPI files separated by comma
    #[arg(long)]
    pub asyncapi_files: String,

    /// context_services, service_channels, channel_services or service_services
    #[arg(long, default_value = "service_channels")]
    pub format_mode: String,

    /// Service to focus on
    #[arg(long)]
    pub service: Option<String>,

    /// Channel to focus on (channel_services mode)
    #[arg(long)]
    pub channel: Option<String>,

    /// Leave message payloads out of channel views
    #[arg(long)]
    pub omit_payloads: bool,

    /// Output file for the diagram description
    #[arg(long)]
    pub format_to_file: Option<PathBuf>,

    /// Output file for the rendered diagram
    #[arg(long)]
    pub render_to_file: Option<PathBuf>,
}

/// Execute gen-schema command
pub fn execute(args: GenSchemaArgs, d2_bin: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if args.format_to_file.is_none() && args.render_to_file.is_none() {
        return Err("either --format-to-file or --render-to-file must be specified".into());
    }

    let target = pick_target(&args.target, d2_bin)?;
    let mode: FormatMode = args.format_mode.parse()?;

    let mut options = FormatOptions::new(mode);
    options.service = args.service;
    options.channel = args.channel;
    options.omit_payloads = args.omit_payloads;

    let request = SchemaRequest {
        files: split_paths(&args.asyncapi_files),
        options,
        format_to: args.format_to_file,
        render_to: args.render_to_file,
    };

    let outcome = generate_schema(&request, &target)?;

    if let Some(path) = outcome.formatted_to {
        println!("✓ Formatted schema written to {}", path.display());
    }
    if let Some(path) = outcome.rendered_to {
        println!("✓ Rendered diagram written to {}", path.display());
    }

    Ok(())
}
