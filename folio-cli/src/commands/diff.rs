//! `folio diff`: show what `build` would change in each manifest.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::TargetKind;
use folio_sync::{diff_manifest, BuildOptions};

use super::{select_targets, storyblok_source, ConfigArgs};

/// Arguments for `folio diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Diff only this target.
    #[arg(long)]
    pub target: Option<String>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let targets: Vec<_> = select_targets(&config, self.target.as_deref())?
            .into_iter()
            .filter(|t| t.kind == TargetKind::Literature)
            .collect();
        if targets.is_empty() {
            println!("No literature targets to diff.");
            return Ok(());
        }

        let source = storyblok_source(&config)?;
        for target in targets {
            let result = diff_manifest(&BuildOptions::from_target(target, true), &source)
                .with_context(|| format!("diff failed for '{}'", target.name))?;

            match result.unified_diff {
                None => println!("No differences for '{}'.", target.name),
                Some(diff) => {
                    print!("{diff}");
                    if !diff.ends_with('\n') {
                        println!();
                    }
                }
            }
        }

        Ok(())
    }
}
