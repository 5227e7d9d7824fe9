//! Command-line options, store selection, and log setup.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppConfig;
use crate::app::sidebar::DEFAULT_LG_BREAKPOINT;
use crate::store::{MemoryBackend, Store, UserStore};

#[derive(Debug, Parser)]
#[command(name = "userdesk", version, about = "Terminal dashboard for a team's user records")]
pub struct Args {
    /// JSON array of users to serve from memory instead of the demo roster.
    #[arg(long, env = "USERDESK_SEED")]
    pub seed: Option<PathBuf>,

    /// REST root exposing `/users`; takes precedence over `--seed`.
    #[arg(long, env = "USERDESK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Terminal width (columns) from which the drawer is permanent.
    #[arg(long, default_value_t = DEFAULT_LG_BREAKPOINT)]
    pub lg_breakpoint: u16,

    #[arg(long, default_value = "theme.conf")]
    pub theme: String,

    #[arg(long, default_value = "keybinds.conf")]
    pub keybinds: String,

    #[arg(long, default_value = "userdesk.log")]
    pub log_file: PathBuf,

    /// Log filter directive, e.g. `info` or `userdesk=debug`.
    #[arg(long, env = "USERDESK_LOG", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            lg_breakpoint: self.lg_breakpoint,
            theme_path: Some(self.theme.clone()),
            keybinds_path: Some(self.keybinds.clone()),
        }
    }

    /// Pick the backend: endpoint, then seed file, then the demo roster.
    pub fn build_store(&self) -> Result<Box<dyn UserStore>> {
        if let Some(endpoint) = &self.endpoint {
            return http_store(endpoint);
        }
        let backend = match &self.seed {
            Some(path) => MemoryBackend::from_json_file(path)?,
            None => MemoryBackend::demo(),
        };
        Ok(Box::new(Store::new(backend)))
    }
}

#[cfg(feature = "http")]
fn http_store(endpoint: &str) -> Result<Box<dyn UserStore>> {
    let backend = crate::store::HttpBackend::new(endpoint)?;
    tracing::info!(endpoint, "using HTTP backend");
    Ok(Box::new(Store::new(backend)))
}

#[cfg(not(feature = "http"))]
fn http_store(endpoint: &str) -> Result<Box<dyn UserStore>> {
    anyhow::bail!("--endpoint {endpoint} requires the `http` feature")
}

/// Send `tracing` output to `path`; the terminal belongs to the TUI.
pub fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    Ok(())
}
