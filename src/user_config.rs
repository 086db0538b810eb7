use crate::feed::FeedMode;
use crate::ui::DEFAULT_DISPLAY_WIDTH;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "TWITTER_SIM_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub default_mode: FeedMode,
    pub display_width: usize,
    pub color: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_mode: FeedMode::default(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            color: true,
        }
    }
}

impl UserConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let user_config = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let user_config = serde_json::from_str(&user_config)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(user_config)
    }

    /// An explicitly requested file must exist; with nothing requested, defaults apply.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let user_config = serde_json::to_string_pretty(self)?;
        fs::write(path, user_config)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }
}
