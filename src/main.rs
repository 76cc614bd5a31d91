mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use cli::Cli;
use cutsync::config::{self, Config};
use cutsync::sync::types::EditRecord;
use cutsync::{ChannelMode, EditEvent, MediaSource, SyncAnalyzer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let mut cfg = Config::default();
    if let Some(path) = cli.config.clone().or_else(config::find_config) {
        match config::load_config(&path) {
            Ok(loaded) => {
                log::info!("Loaded config from {}", path.display());
                cfg = loaded;
            }
            Err(e) => log::warn!("{:#}; using defaults", e),
        }
    }
    if cli.downmix {
        cfg.audio.channel_mode = ChannelMode::Downmix;
    }
    if let Some(tolerance) = cli.tolerance {
        cfg.alignment.tolerance = tolerance;
    }

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    let edits = collect_edits(cli.edits.as_deref(), &cli.cuts)?;

    log::info!("cutsync - cut-to-beat analysis");
    log::info!("Input: {}", cli.input.display());
    log::info!("Edits: {}", edits.len());

    let analyzer = SyncAnalyzer::from_config(&cfg);
    let result = analyzer.analyze(&MediaSource::File(cli.input.clone()), &edits);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            log::info!("Done! Report: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Edits from the JSON file first, then `--cut` labels, sorted by time.
fn collect_edits(edits_path: Option<&Path>, cuts: &[String]) -> Result<Vec<EditEvent>> {
    let mut edits = Vec::new();

    if let Some(path) = edits_path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read edit list: {}", path.display()))?;
        let records: Vec<EditRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid edit list: {}", path.display()))?;
        for record in records {
            edits.push(EditEvent::try_from(record)?);
        }
    }

    for label in cuts {
        edits.push(EditEvent::from_label(label)?);
    }

    edits.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
    Ok(edits)
}
