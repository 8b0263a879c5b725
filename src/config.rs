use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Articles shown per page when the request doesn't ask for a size
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Upper bound for a request-supplied per_page value
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
    /// Directory uploaded images are written to and served from
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
}

fn default_per_page() -> usize {
    10
}

fn default_max_per_page() -> usize {
    100
}

fn default_media_dir() -> String {
    "media".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            media_dir: default_media_dir(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
