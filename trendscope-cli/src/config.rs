//! Batch job file (TOML).
//!
//! ```toml
//! output_dir = "out"
//! parallel = true
//! recent = 10
//!
//! [[job]]
//! ticker = "AAPL"
//! profile = "short"
//! input = "data/AAPL_daily.csv"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use trendscope_core::Profile;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BatchConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Also write a JSON summary with this many trailing rows per job.
    #[serde(default)]
    pub recent: Option<usize>,

    #[serde(default, rename = "job")]
    pub jobs: Vec<JobSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JobSpec {
    pub ticker: String,
    pub profile: String,
    pub input: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_parallel() -> bool {
    true
}

impl JobSpec {
    pub fn profile(&self) -> Result<Profile> {
        self.profile
            .parse()
            .map_err(|e: String| anyhow::anyhow!("job '{}': {e}", self.ticker))
    }
}

impl BatchConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read batch config {}", path.display()))?;
        let mut config = Self::from_toml(&content)?;

        // Relative inputs are resolved against the config file's directory.
        if let Some(base) = path.parent() {
            for job in &mut config.jobs {
                if job.input.is_relative() {
                    job.input = base.join(&job.input);
                }
            }
            if config.output_dir.is_relative() {
                config.output_dir = base.join(&config.output_dir);
            }
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("parse batch config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jobs.is_empty() {
            bail!("batch config has no [[job]] entries");
        }
        let mut seen = HashSet::new();
        for job in &self.jobs {
            if job.ticker.trim().is_empty() {
                bail!("job with input {} has an empty ticker", job.input.display());
            }
            let profile = job.profile()?;
            if !seen.insert((job.ticker.clone(), profile)) {
                bail!("duplicate job: ticker '{}' with profile {profile}", job.ticker);
            }
        }
        Ok(())
    }
}
