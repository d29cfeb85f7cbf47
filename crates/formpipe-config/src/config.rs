// crates/formpipe-config/src/config.rs
// ============================================================================
// Module: Formpipe Configuration
// Description: Configuration loading and validation for the pipeline.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: formpipe-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed. The signing key is stored
//! as hex in the file and decoded to raw bytes here, so the pipeline itself
//! never sees encoded key material.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use formpipe_core::PipelineLimits;
use formpipe_core::VerificationParams;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "formpipe.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "FORMPIPE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum accepted responses per submission.
pub(crate) const MAX_RESPONSES_CEILING: usize = 10_000;
/// Maximum accepted byte length of a single response body.
pub(crate) const MAX_ANSWER_BYTES_CEILING: usize = 1024 * 1024;
/// Minimum signing key length in hex characters (16 raw bytes).
pub(crate) const MIN_KEY_HEX_LENGTH: usize = 32;
/// Maximum signing key length in hex characters (64 raw bytes).
pub(crate) const MAX_KEY_HEX_LENGTH: usize = 128;
/// Minimum allowed signature age window in seconds.
pub(crate) const MIN_SIGNATURE_MAX_AGE_SECS: u64 = 60;
/// Maximum allowed signature age window in seconds.
pub(crate) const MAX_SIGNATURE_MAX_AGE_SECS: u64 = 86_400;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Formpipe configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormpipeConfig {
    /// Pipeline input limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Verified-field signature settings; absent disables verified fields.
    #[serde(default)]
    pub verification: Option<VerificationConfig>,
}

/// Pipeline input limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of responses per submission.
    #[serde(default = "default_max_responses")]
    pub max_responses: usize,
    /// Maximum byte length of a single response body.
    #[serde(default = "default_max_answer_bytes")]
    pub max_answer_bytes: usize,
}

/// Verified-field signature configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// Signing key shared with the verification service, hex encoded.
    pub key: String,
    /// Maximum accepted signature age in seconds.
    pub max_age_secs: u64,
}

/// Default maximum responses per submission.
fn default_max_responses() -> usize {
    PipelineLimits::default().max_responses
}

/// Default maximum answer byte length.
fn default_max_answer_bytes() -> usize {
    PipelineLimits::default().max_answer_bytes
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_responses: default_max_responses(),
            max_answer_bytes: default_max_answer_bytes(),
        }
    }
}

impl FormpipeConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, then the `FORMPIPE_CONFIG`
    /// environment variable, then `formpipe.toml` in the working directory.
    /// When none of these name a file, built-in defaults are returned.
    /// Explicitly named files must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;
        if let Some(verification) = &self.verification {
            verification.validate()?;
        }
        Ok(())
    }

    /// Returns the pipeline limits for this configuration.
    #[must_use]
    pub const fn pipeline_limits(&self) -> PipelineLimits {
        PipelineLimits {
            max_responses: self.limits.max_responses,
            max_answer_bytes: self.limits.max_answer_bytes,
        }
    }

    /// Returns decoded verification parameters when configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the key hex fails to decode.
    pub fn verification_params(&self) -> Result<Option<VerificationParams>, ConfigError> {
        self.verification
            .as_ref()
            .map(|verification| {
                Ok(VerificationParams {
                    key: decode_hex_key(&verification.key)?,
                    max_age_secs: verification.max_age_secs,
                })
            })
            .transpose()
    }
}

impl LimitsConfig {
    /// Validates limit values against hard ceilings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_responses == 0 || self.max_responses > MAX_RESPONSES_CEILING {
            return Err(ConfigError::Invalid(
                "limits.max_responses must be between 1 and 10000".to_string(),
            ));
        }
        if self.max_answer_bytes == 0 || self.max_answer_bytes > MAX_ANSWER_BYTES_CEILING {
            return Err(ConfigError::Invalid(
                "limits.max_answer_bytes must be between 1 and 1048576".to_string(),
            ));
        }
        Ok(())
    }
}

impl VerificationConfig {
    /// Validates key encoding and the signature age window.
    fn validate(&self) -> Result<(), ConfigError> {
        let key = self.key.trim();
        if key.len() < MIN_KEY_HEX_LENGTH || key.len() > MAX_KEY_HEX_LENGTH {
            return Err(ConfigError::Invalid(
                "verification.key must be 32 to 128 hex characters".to_string(),
            ));
        }
        if key.len() % 2 != 0 || !key.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::Invalid(
                "verification.key must be an even-length hex string".to_string(),
            ));
        }
        if self.max_age_secs < MIN_SIGNATURE_MAX_AGE_SECS
            || self.max_age_secs > MAX_SIGNATURE_MAX_AGE_SECS
        {
            return Err(ConfigError::Invalid(
                "verification.max_age_secs must be between 60 and 86400".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults; `None` means
/// no file was named anywhere and defaults apply.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    if default.exists() {
        return Ok(Some(default));
    }
    Ok(None)
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Decodes a validated hex key string into raw bytes.
fn decode_hex_key(key: &str) -> Result<Vec<u8>, ConfigError> {
    let key = key.trim();
    let invalid = || ConfigError::Invalid("verification.key is not valid hex".to_string());
    if key.len() % 2 != 0 {
        return Err(invalid());
    }
    key.as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|_| invalid())?;
            u8::from_str_radix(text, 16).map_err(|_| invalid())
        })
        .collect()
}
