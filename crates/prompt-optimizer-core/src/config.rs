use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};
use crate::llm::LlmConfig;

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# prompt-optimizer configuration file
# Location: ~/.prompt-optimizer/config.toml

[llm]
# Base URL of an OpenAI-compatible API ("/chat/completions" is appended)
# Default: "https://api.openai.com/v1"
endpoint = "https://api.openai.com/v1"

# Model used for both the original and the optimized prompt
# Default: "gpt-4"
model = "gpt-4"

# Request timeout in seconds
# Default: 60
timeout_secs = 60

# Environment variable holding the API key (the key itself is never stored here)
# Default: "OPENAI_API_KEY"
api_key_env = "OPENAI_API_KEY"
"#;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| OptimizerError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "llm.endpoint" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid(key, value, "must start with http:// or https://"));
                }
                self.llm.endpoint = value.to_string();
            }
            "llm.model" => {
                if value.is_empty() {
                    return Err(invalid(key, value, "must not be empty"));
                }
                self.llm.model = value.to_string();
            }
            "llm.timeout_secs" => {
                self.llm.timeout_secs = match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => return Err(invalid(key, value, "must be a positive integer")),
                };
            }
            "llm.api_key_env" => {
                if value.is_empty() || value.contains(char::is_whitespace) {
                    return Err(invalid(key, value, "must be a variable name"));
                }
                self.llm.api_key_env = value.to_string();
            }
            _ => {
                return Err(OptimizerError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("llm.endpoint".to_string(), self.llm.endpoint.clone()),
            ("llm.model".to_string(), self.llm.model.clone()),
            (
                "llm.timeout_secs".to_string(),
                self.llm.timeout_secs.to_string(),
            ),
            ("llm.api_key_env".to_string(), self.llm.api_key_env.clone()),
        ]
    }
}

fn invalid(key: &str, value: &str, message: &str) -> OptimizerError {
    OptimizerError::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
