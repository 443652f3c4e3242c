use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use legacy_image::{schema1, DirBlobSource, Digest, MediaType};

mod report;

#[derive(Parser)]
#[command(name = "legacy-image")]
#[command(about = "Inspect a Docker schema 1 image as a modern image")]
#[command(version = "0.1.0")]
struct Cli {
    /// Blob directory laid out as <algorithm>/<hex> (e.g. an OCI layout's blobs/)
    blobs: PathBuf,

    /// Digest of the schema 1 manifest blob
    digest: String,

    /// Media type to report for the manifest
    #[arg(long, default_value = "application/vnd.docker.distribution.manifest.v1+prettyjws")]
    media_type: String,

    /// When to colorize output: auto, always, never
    #[arg(long, default_value = "auto")]
    color: String,

    /// List the files in each layer
    #[arg(long)]
    files: bool,

    /// Compute the uncompressed digest of each layer
    #[arg(long)]
    diff_ids: bool,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Determine if we should use color
    let use_color = match cli.color.as_str() {
        "always" => true,
        "never" => false,
        _ => atty::is(atty::Stream::Stdout),
    };

    let digest: Digest = cli
        .digest
        .parse()
        .with_context(|| format!("Invalid manifest digest: {}", cli.digest))?;

    let media_type = MediaType::from(cli.media_type);
    if !media_type.is_schema1() {
        tracing::warn!(media_type = %media_type, "Media type is not a schema 1 manifest type");
    }

    let source = Arc::new(DirBlobSource::new(&cli.blobs));
    let image = schema1::child(source, digest, media_type)
        .with_context(|| format!("Failed to load manifest from {}", cli.blobs.display()))?;

    let options = report::ReportOptions {
        list_files: cli.files,
        diff_ids: cli.diff_ids,
    };
    let report = report::build_report(&image, &options)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", json);
    } else {
        report::render_report(&report, use_color)?;
    }

    Ok(())
}
