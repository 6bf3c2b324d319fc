//! Configuration module for Comply Gateway.
//!
//! Loads configuration from YAML files and environment variables.

use std::time::Duration;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable holding the completion API credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub policy: PolicyConfig,
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Completion API configuration.
#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    /// API credential. Overridden by `GROQ_API_KEY` when that is set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    pub temperature: f32,
    /// Response length cap in tokens.
    pub max_tokens: u32,
    /// Upper bound for a single completion call.
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Policy document configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Path of the plain-text policy file, relative to the working directory.
    pub path: String,
    /// Character budget for the policy excerpt placed in each prompt.
    pub max_chars: usize,
    /// Fail startup on read errors other than "not found".
    #[serde(default)]
    pub strict: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. `GROQ_API_KEY` (credential only)
    /// 2. Environment variables (COMPLY_*)
    /// 3. config/local.yaml (if exists)
    /// 4. config/default.yaml (if exists)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::default(), std::env::var(API_KEY_ENV).ok())
    }

    /// Load using `environment` as the process environment and `api_key_env`
    /// as the value of `GROQ_API_KEY`.
    fn load_with(environment: Environment, api_key_env: Option<String>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000_i64)?
            .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
            .set_default("llm.model", "llama-3.1-8b-instant")?
            .set_default("llm.temperature", 0.1_f64)?
            .set_default("llm.max_tokens", 150_i64)?
            .set_default("llm.timeout_secs", 30_i64)?
            .set_default("policy.path", "data/policies/policy.txt")?
            .set_default("policy.max_chars", 1500_i64)?
            .set_default("policy.strict", false)?
            .set_default("logging.format", "json")?
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with COMPLY_ prefix
            .add_source(
                environment
                    .prefix("COMPLY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.llm.api_key = resolve_api_key(config.llm.api_key.take(), api_key_env);

        Ok(config)
    }
}

/// Pick the credential: the dedicated environment variable wins over
/// configured values, and blank values count as missing.
pub fn resolve_api_key(configured: Option<String>, from_env: Option<String>) -> Option<String> {
    let usable = |key: Option<String>| {
        key.map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    };

    usable(from_env).or_else(|| usable(configured))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fake_env(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(vars))
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_with(fake_env(&[]), None).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.api_key, None);
        assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 150);
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.timeout(), Duration::from_secs(30));
        assert_eq!(config.policy.path, "data/policies/policy.txt");
        assert_eq!(config.policy.max_chars, 1500);
        assert!(!config.policy.strict);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_environment_overrides() {
        let env = fake_env(&[
            ("COMPLY_SERVER__PORT", "9000"),
            ("COMPLY_LLM__MODEL", "llama-3.3-70b-versatile"),
            ("COMPLY_POLICY__STRICT", "true"),
            ("COMPLY_LOGGING__FORMAT", "pretty"),
            ("UNRELATED__PORT", "1"),
        ]);

        let config = Config::load_with(env, None).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert!(config.policy.strict);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_groq_key_applied_on_load() {
        let env = fake_env(&[("COMPLY_LLM__API_KEY", "gsk_from_config")]);
        let config = Config::load_with(env, Some("gsk_from_env".to_string())).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_from_env"));

        let env = fake_env(&[("COMPLY_LLM__API_KEY", "gsk_from_config")]);
        let config = Config::load_with(env, Some("  ".to_string())).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_from_config"));
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let env = fake_env(&[("COMPLY_LOGGING__FORMAT", "xml")]);
        assert!(Config::load_with(env, None).is_err());
    }

    #[test]
    fn test_env_key_takes_precedence() {
        let key = resolve_api_key(Some("from-file".into()), Some("from-env".into()));
        assert_eq!(key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_configured_key_used_without_env() {
        let key = resolve_api_key(Some("from-file".into()), None);
        assert_eq!(key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_blank_keys_are_missing() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(Some("  ".into()), Some(String::new())), None);
        assert_eq!(
            resolve_api_key(Some("gsk_live".into()), Some("   ".into())).as_deref(),
            Some("gsk_live")
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let llm = LlmConfig {
            api_key: Some("gsk_secret".to_string()),
            base_url: "http://localhost".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.1,
            max_tokens: 150,
            timeout_secs: 30,
        };

        let printed = format!("{:?}", llm);
        assert!(!printed.contains("gsk_secret"));
        assert!(printed.contains("<redacted>"));
        assert_eq!(llm.timeout(), Duration::from_secs(30));
    }
}
