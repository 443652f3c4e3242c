use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Read, Write};
use tar::Archive;

use legacy_image::{Digest, Error, Image, Layer, MediaType};

pub struct ReportOptions {
    pub list_files: bool,
    pub diff_ids: bool,
}

#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub digest: Digest,
    pub media_type: MediaType,
    pub config: Digest,
    pub manifest_size: u64,
    pub layers: Vec<LayerReport>,
}

#[derive(Debug, Serialize)]
pub struct LayerReport {
    pub digest: Digest,
    pub media_type: MediaType,
    /// None when the format cannot tell
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_id: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

/// Collect everything the CLI prints about an image
pub fn build_report(image: &dyn Image, options: &ReportOptions) -> Result<ImageReport> {
    let layers = image.layers().context("Failed to read layers")?;

    let mut reports = Vec::with_capacity(layers.len());
    for layer in layers.iter() {
        reports.push(layer_report(layer.as_ref(), options)?);
    }

    Ok(ImageReport {
        digest: image.digest()?,
        media_type: image.media_type()?,
        config: image.config_name()?,
        manifest_size: image.size()?,
        layers: reports,
    })
}

fn layer_report(layer: &dyn Layer, options: &ReportOptions) -> Result<LayerReport> {
    let digest = layer.digest()?;

    let size = match layer.size() {
        Ok(size) => Some(size),
        Err(Error::UnknownSize(_)) => None,
        Err(err) => return Err(err.into()),
    };

    let diff_id = if options.diff_ids {
        Some(
            layer
                .diff_id()
                .with_context(|| format!("Failed to compute diff ID of {}", digest))?,
        )
    } else {
        None
    };

    let files = if options.list_files {
        let reader = layer
            .uncompressed()
            .with_context(|| format!("Failed to open layer {}", digest))?;
        Some(list_entries(reader)?)
    } else {
        None
    };

    Ok(LayerReport {
        digest,
        media_type: layer.media_type()?,
        size,
        diff_id,
        files,
    })
}

/// Paths of every entry in a layer tarball, in archive order
fn list_entries<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut archive = Archive::new(reader);
    archive.set_ignore_zeros(true);

    let mut paths = Vec::new();
    for entry in archive.entries().context("Failed to read layer entries")? {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                // Skip corrupted entries but continue listing
                tracing::warn!(error = %err, "Skipping corrupted entry");
                continue;
            }
        };
        let path = entry.path().context("Failed to read entry path")?;
        paths.push(path.to_string_lossy().trim_start_matches("./").to_string());
    }

    Ok(paths)
}

pub fn render_report(report: &ImageReport, use_color: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, report, use_color)?;
    handle.flush()
}

fn write_report<W: Write>(writer: &mut W, report: &ImageReport, use_color: bool) -> io::Result<()> {
    writeln!(writer, "Image   {} ({})", paint_digest(&report.digest, use_color), report.media_type)?;
    writeln!(writer, "Config  {}", paint_digest(&report.config, use_color))?;
    writeln!(writer, "Size    {} bytes (manifest)", report.manifest_size)?;
    writeln!(writer, "Layers  {} (most recent first)", report.layers.len())?;

    for (idx, layer) in report.layers.iter().enumerate() {
        let size = match layer.size {
            Some(size) => format!("{} bytes", size),
            None => "size unknown".to_string(),
        };
        writeln!(
            writer,
            "  [{}] {}  {}",
            idx,
            paint_digest(&layer.digest, use_color),
            size
        )?;

        if let Some(ref diff_id) = layer.diff_id {
            writeln!(writer, "      diff_id {}", paint_digest(diff_id, use_color))?;
        }

        if let Some(ref files) = layer.files {
            for path in files {
                writeln!(writer, "      {}", path)?;
            }
        }
    }

    Ok(())
}

fn paint_digest(digest: &Digest, use_color: bool) -> String {
    if use_color {
        format!("{}:{}", digest.algorithm().dimmed(), digest.hex().yellow())
    } else {
        digest.to_string()
    }
}
