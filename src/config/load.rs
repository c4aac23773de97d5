use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::builtin::builtin_config;
use super::types::{SheetConfig, SlicerConfig};
use crate::pipeline::WorkItem;

/// A slicer configuration with the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: SlicerConfig,
    /// Base directory for `sheet` and `output_dir` entries
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: SlicerConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version != 1 {
            bail!(
                "unsupported config version {} in {}",
                config.version,
                path.display()
            );
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// The built-in sheet table, relative to the current directory
    pub fn builtin() -> Self {
        Self {
            config: builtin_config(),
            config_dir: PathBuf::from("."),
        }
    }

    /// Resolve entries into pipeline work items.
    ///
    /// Entries are kept only if their sheet path matches one of `only`
    /// (every entry when `only` is empty).
    pub fn work_items(&self, only: &[String]) -> Result<Vec<WorkItem>> {
        let patterns = only
            .iter()
            .map(|p| glob::Pattern::new(p).with_context(|| format!("invalid glob pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(self
            .config
            .sheets
            .iter()
            .filter(|entry| patterns.is_empty() || patterns.iter().any(|p| p.matches(&entry.sheet)))
            .map(|entry| self.resolve_entry(entry))
            .collect())
    }

    fn resolve_entry(&self, entry: &SheetConfig) -> WorkItem {
        WorkItem {
            sheet: self.config_dir.join(&entry.sheet),
            output_dir: self.config_dir.join(&entry.output_dir),
            spec: entry.frame_spec(),
        }
    }
}
