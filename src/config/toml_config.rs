use crate::core::persist::DEFAULT_STORAGE_KEY;
use crate::utils::error::{ResumeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./resumedia-data";

/// Settings file. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_analyzer_delay")]
    pub delay_ms: u64,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_max_score")]
    pub max_score: u32,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_delay")]
    pub delay_ms: u64,
}

fn default_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_analyzer_delay() -> u64 {
    2000
}

fn default_min_score() -> u32 {
    60
}

fn default_max_score() -> u32 {
    99
}

fn default_assistant_delay() -> u64 {
    1000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_analyzer_delay(),
            min_score: default_min_score(),
            max_score: default_max_score(),
            seed: None,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_assistant_delay(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ResumeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ResumeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESUMEDIA_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ResumeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.dir", &self.storage.dir)?;
        validate_non_empty_string("storage.key", &self.storage.key)?;

        validate_range("analyzer.min_score", self.analyzer.min_score, 0, 100)?;
        validate_range("analyzer.max_score", self.analyzer.max_score, 0, 100)?;
        if self.analyzer.min_score > self.analyzer.max_score {
            return Err(ResumeError::InvalidConfigValueError {
                field: "analyzer.min_score".to_string(),
                value: self.analyzer.min_score.to_string(),
                reason: format!(
                    "Must not exceed analyzer.max_score ({})",
                    self.analyzer.max_score
                ),
            });
        }

        validate_range("analyzer.delay_ms", self.analyzer.delay_ms, 0, 60_000)?;
        validate_range("assistant.delay_ms", self.assistant.delay_ms, 0, 60_000)?;
        Ok(())
    }

    pub fn analyzer_delay(&self) -> Duration {
        Duration::from_millis(self.analyzer.delay_ms)
    }

    pub fn assistant_delay(&self) -> Duration {
        Duration::from_millis(self.assistant.delay_ms)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
