use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::view::table::DEFAULT_PAGE_SIZE;

/// Command line flags. Anything given here overrides the config file.
#[derive(Debug, Parser)]
#[command(name = "gridiron-lens")]
#[command(about = "Historical NFL team statistics dashboard", long_about = None)]
pub struct Cli {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Team statistics file (.csv, .json or .parquet)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Directory holding the team logo images
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Seed for the initial team selection
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub asset_dir: Option<PathBuf>,
    pub page_size: usize,
    /// How many teams are pre-selected at startup.
    pub default_team_sample: usize,
    pub seed: Option<u64>,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            asset_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            default_team_sample: 8,
            seed: None,
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Config file (if any) with command line overrides applied.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(data) = &cli.data {
            config.data_path = data.clone();
        }
        if let Some(assets) = &cli.assets {
            config.asset_dir = Some(assets.clone());
        }
        if cli.seed.is_some() {
            config.seed = cli.seed;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_fields_take_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"data_path": "nfl.parquet", "page_size": 32}"#)
            .unwrap();
        let cfg = DashboardConfig::load(temp.path()).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("nfl.parquet"));
        assert_eq!(cfg.page_size, 32);
        assert_eq!(cfg.default_team_sample, 8);
        assert_eq!(cfg.asset_dir, None);
    }

    #[test]
    fn cli_overrides_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"data_path": "a.csv", "seed": 1}"#).unwrap();
        let cli = Cli::parse_from([
            "gridiron-lens",
            "--config",
            temp.path().to_str().unwrap(),
            "--data",
            "b.csv",
            "--assets",
            "logos",
        ]);
        let cfg = DashboardConfig::from_cli(&cli).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("b.csv"));
        assert_eq!(cfg.asset_dir, Some(PathBuf::from("logos")));
        assert_eq!(cfg.seed, Some(1));
    }

    #[test]
    fn bad_config_reports_path() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"not json").unwrap();
        let err = DashboardConfig::load(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing dashboard config"));
    }
}
