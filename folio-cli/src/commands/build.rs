//! `folio build`: reconcile every target against the content API.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::TargetKind;
use folio_sync::{build_literature, build_video_map, BuildOptions, BuildReport, VideoMap, WriteResult};

use super::{select_targets, storyblok_source, ConfigArgs};

/// Arguments for `folio build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Build only this target.
    #[arg(long)]
    pub target: Option<String>,

    /// Classify changes without running side effects or writing files.
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let targets = select_targets(&config, self.target.as_deref())?;
        if targets.is_empty() {
            println!("No targets configured in {}.", self.config.config.display());
            return Ok(());
        }

        let source = storyblok_source(&config)?;
        let categories = config.category_map();

        for target in targets {
            let options = BuildOptions::from_target(target, self.dry_run);
            match target.kind {
                TargetKind::Literature => {
                    let report = build_literature(&options, &source)
                        .with_context(|| format!("build failed for '{}'", target.name))?;
                    print_report(&target.name, &report, self.dry_run);
                }
                TargetKind::Videos => {
                    let (map, result) = build_video_map(&options, &source, &categories)
                        .with_context(|| format!("build failed for '{}'", target.name))?;
                    print_video_map(&target.name, &map, &result, self.dry_run);
                }
            }
        }

        Ok(())
    }
}

fn print_report(name: &str, report: &BuildReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let changes = &report.changes;

    if report.bootstrapped {
        println!(
            "{prefix}✓ '{name}' bootstrapped ({} entries, {} ms)",
            report.entry_count, report.duration_ms
        );
    } else if !changes.has_changes() {
        println!("{prefix}✓ '{name}': nothing to do");
        return;
    } else {
        println!(
            "{prefix}✓ '{name}' built ({} added, {} updated, {} removed, {} ms)",
            changes.added.len(),
            changes.updated.len(),
            changes.deleted.len(),
            report.duration_ms
        );
    }

    for id in &changes.added {
        println!("  {} {id}", "+ add".green());
    }
    for id in &changes.updated {
        println!("  {} {id}", "~ upd".yellow());
    }
    for id in &changes.deleted {
        println!("  {} {id}", "- omit".red());
    }
    if report.manifest_written {
        println!("  ✎  {}", report.manifest_path.display());
    }
}

fn print_video_map(name: &str, map: &VideoMap, result: &WriteResult, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let videos: usize = map.values().map(Vec::len).sum();
    println!(
        "{prefix}✓ '{name}' grouped {videos} videos into {} categories",
        map.len()
    );
    match result {
        WriteResult::Written { path } => println!("  ✎  {}", path.display()),
        WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
    }
}
