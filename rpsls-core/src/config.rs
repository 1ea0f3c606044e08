//! Match configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Points needed to win a match
pub const DEFAULT_WIN_THRESHOLD: u32 = 3;

/// Configuration for a match session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Score that ends a match
    pub win_threshold: u32,
    /// Random seed for the computer (None = entropy)
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            win_threshold: DEFAULT_WIN_THRESHOLD,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the winning score (at least 1)
    pub fn with_win_threshold(mut self, win_threshold: u32) -> Self {
        self.win_threshold = win_threshold.max(1);
        self
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: MatchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if config.win_threshold == 0 {
            anyhow::bail!("win_threshold must be at least 1");
        }
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.win_threshold, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = MatchConfig::default().with_seed(9).with_win_threshold(0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.win_threshold, 1);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");

        let config = MatchConfig::default().with_seed(1234).with_win_threshold(5);
        config.save(&path).unwrap();
        let loaded = MatchConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "seed": 7 }"#).unwrap();

        let loaded = MatchConfig::load(&path).unwrap();
        assert_eq!(loaded.win_threshold, DEFAULT_WIN_THRESHOLD);
        assert_eq!(loaded.seed, Some(7));
    }

    #[test]
    fn test_load_rejects_zero_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.json");
        std::fs::write(&path, r#"{ "win_threshold": 0 }"#).unwrap();
        assert!(MatchConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = MatchConfig::load(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = MatchConfig::load(&broken).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
        assert!(err.to_string().contains("broken.json"));
    }
}
