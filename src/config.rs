//! Service Configuration
//!
//! Reads the process environment (after `.env` has been loaded) into a typed
//! configuration. Missing secrets are fatal at startup.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";
pub const DEFAULT_MODEL: &str = "qwen-3-235b-a22b-thinking-2507";
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Which result shape the pipeline produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Four-field report, compact prompt
    #[default]
    Simplified,
    /// Four-field report plus the long-form sections, extended prompt
    Comprehensive,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Simplified => "simplified",
            OutputMode::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simplified" | "simple" | "compact" => Ok(OutputMode::Simplified),
            "comprehensive" | "detailed" | "extended" => Ok(OutputMode::Comprehensive),
            _ => Err(ConfigError::Invalid {
                key: "JUDGE_OUTPUT_MODE",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for the judge service
#[derive(Clone)]
pub struct JudgeConfig {
    /// Wallet seed phrase for the signing identity
    pub mnemonic: String,
    /// Completion provider credential
    pub api_key: String,
    pub host: String,
    pub port: u16,
    /// OpenAI-compatible base URL of the completion provider
    pub base_url: String,
    pub model: String,
    pub completion_timeout: Duration,
    pub output_mode: OutputMode,
}

impl fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("mnemonic", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("completion_timeout", &self.completion_timeout)
            .field("output_mode", &self.output_mode)
            .finish()
    }
}

impl JudgeConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup, so tests never touch
    /// the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mnemonic = get("MNEMONIC").ok_or(ConfigError::Missing("MNEMONIC"))?;
        let api_key = get("CEREBRAS_API_KEY").ok_or(ConfigError::Missing("CEREBRAS_API_KEY"))?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let completion_timeout = match get("COMPLETION_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "COMPLETION_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_COMPLETION_TIMEOUT,
        };

        let output_mode = match get("JUDGE_OUTPUT_MODE") {
            Some(raw) => raw.parse()?,
            None => OutputMode::default(),
        };

        Ok(Self {
            mnemonic: mnemonic.trim().to_string(),
            api_key,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            base_url: get("CEREBRAS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("JUDGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_timeout,
            output_mode,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
