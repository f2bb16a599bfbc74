use crate::utils::error::{LabError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the collaborators used by the payment and transcription demos.
///
/// Every section is optional; an empty document yields the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub payment: PaymentSettings,
    pub transcribe: TranscribeSettings,
    pub singleton: SingletonSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    pub gateway_url: String,
    pub api_key: Option<String>,
    pub currency: String,
    pub price_id: Option<String>,
    pub sms_gateway: String,
    pub transaction_log: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:8080".to_string(),
            api_key: None,
            currency: "usd".to_string(),
            price_id: None,
            sms_gateway: "default-sms-gateway".to_string(),
            transaction_log: "transactions.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscribeSettings {
    pub transcriber_url: String,
    pub model: String,
    pub work_dir: String,
    pub output_dir: String,
}

impl Default for TranscribeSettings {
    fn default() -> Self {
        Self {
            transcriber_url: "http://localhost:9000/transcribe".to_string(),
            model: "large".to_string(),
            work_dir: "temp_audio".to_string(),
            output_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonSettings {
    pub connect_delay_ms: u64,
}

impl Default for SingletonSettings {
    fn default() -> Self {
        Self {
            connect_delay_ms: 1000,
        }
    }
}

impl LabConfig {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string, expanding `${VAR}` references first
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: LabConfig = toml::from_str(&processed_content)?;
        Ok(config.with_unresolved_secrets_cleared())
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| LabError::config("env_substitution", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    // An api_key still reading "${STRIPE_API_KEY}" means the variable was unset.
    fn with_unresolved_secrets_cleared(mut self) -> Self {
        if self
            .payment
            .api_key
            .as_deref()
            .is_some_and(|key| key.starts_with("${"))
        {
            self.payment.api_key = None;
        }
        self
    }
}

impl Validate for LabConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("payment.gateway_url", &self.payment.gateway_url)?;
        validation::validate_non_empty_string("payment.currency", &self.payment.currency)?;
        validation::validate_path("payment.transaction_log", &self.payment.transaction_log)?;
        validation::validate_url(
            "transcribe.transcriber_url",
            &self.transcribe.transcriber_url,
        )?;
        validation::validate_path("transcribe.work_dir", &self.transcribe.work_dir)?;
        validation::validate_path("transcribe.output_dir", &self.transcribe.output_dir)?;
        Ok(())
    }
}
