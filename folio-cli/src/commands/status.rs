//! `folio status`: manifest state per target, without touching the API.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use folio_core::{TargetConfig, TargetKind};
use folio_sync::{
    manifest_store::{self, ManifestState},
    videos::VIDEO_MAP_FILE,
    BuildOptions, SyncError, VideoMap,
};

use super::ConfigArgs;

/// Arguments for `folio status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let rows = config
            .targets
            .iter()
            .map(target_status)
            .collect::<Result<Vec<_>>>()?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_table(&config.root, rows);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum State {
    Missing,
    Present,
    Corrupt,
}

#[derive(Debug, Clone, Serialize)]
struct TargetStatus {
    name: String,
    kind: TargetKind,
    path: PathBuf,
    state: State,
    entries: Option<usize>,
    modified_at: Option<DateTime<Utc>>,
}

#[derive(Tabled)]
struct StatusTableRow {
    target: String,
    kind: String,
    entries: String,
    state: String,
    updated: String,
}

fn target_status(target: &TargetConfig) -> Result<TargetStatus> {
    let options = BuildOptions::from_target(target, true);
    let path = match target.kind {
        TargetKind::Literature => options.manifest_path(),
        TargetKind::Videos => options.build_dir().map(|dir| dir.join(VIDEO_MAP_FILE)),
    }
    .with_context(|| format!("cannot resolve build path for '{}'", target.name))?;

    let (state, entries) = match target.kind {
        TargetKind::Literature => match manifest_store::load(&path) {
            Ok(ManifestState::Bootstrap) => (State::Missing, None),
            Ok(ManifestState::Loaded(manifest)) => (State::Present, Some(manifest.len())),
            Err(err @ SyncError::CorruptManifest { .. }) => {
                tracing::warn!("{}: {err}", target.name);
                (State::Corrupt, None)
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("cannot read manifest for '{}'", target.name))
            }
        },
        TargetKind::Videos => video_map_state(&path)
            .with_context(|| format!("cannot read video map for '{}'", target.name))?,
    };

    Ok(TargetStatus {
        name: target.name.clone(),
        kind: target.kind,
        modified_at: modified_at(&path),
        path,
        state,
        entries,
    })
}

fn video_map_state(path: &Path) -> std::io::Result<(State, Option<usize>)> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok((State::Missing, None)),
        Err(err) => return Err(err),
    };
    Ok(match serde_json::from_slice::<VideoMap>(&raw) {
        Ok(map) => (State::Present, Some(map.values().map(Vec::len).sum())),
        Err(_) => (State::Corrupt, None),
    })
}

fn modified_at(path: &Path) -> Option<DateTime<Utc>> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified))
}

fn print_table(root: &Path, rows: Vec<TargetStatus>) {
    println!(
        "{} v{} | {} targets | root {}",
        "Folio".bold(),
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        root.display()
    );

    if rows.is_empty() {
        println!("No targets configured.");
        return;
    }

    let needs_build = rows.iter().any(|r| r.state != State::Present);
    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            target: row.name,
            kind: row.kind.to_string(),
            entries: row.entries.map_or_else(|| "-".to_string(), |n| n.to_string()),
            state: state_label(row.state).to_string(),
            updated: row
                .modified_at
                .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if needs_build {
        println!("{}", "Run 'folio build' to rebuild missing or corrupt targets.".yellow());
    }
}

fn state_label(state: State) -> &'static str {
    match state {
        State::Missing => "MISSING",
        State::Present => "PRESENT",
        State::Corrupt => "CORRUPT",
    }
}
