pub mod build;
pub mod diff;
pub mod status;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use folio_core::config::{self, DEFAULT_CONFIG_FILE};
use folio_core::{FolioConfig, TargetConfig};
use folio_renderer::MarkupRenderer;
use folio_source::{HttpStoryApi, StoryblokSource};

/// `--config` shared by every command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the build configuration.
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<FolioConfig> {
        config::load_at(&self.config)
            .with_context(|| format!("failed to load config {}", self.config.display()))
    }
}

/// Every target, or just `name` when given.
pub fn select_targets<'a>(
    config: &'a FolioConfig,
    name: Option<&str>,
) -> Result<Vec<&'a TargetConfig>> {
    match name {
        Some(name) => match config.target(name) {
            Some(target) => Ok(vec![target]),
            None => bail!("no target named '{name}' in config"),
        },
        None => Ok(config.targets.iter().collect()),
    }
}

/// Live content source built from the `api` section.
pub fn storyblok_source(config: &FolioConfig) -> Result<StoryblokSource<HttpStoryApi>> {
    let api = HttpStoryApi::from_config(&config.api).context("cannot reach the content API")?;
    let renderer = MarkupRenderer::new().context("failed to initialise the markup renderer")?;
    Ok(StoryblokSource::new(api, renderer))
}
