use log::{info, LevelFilter};
use url::Url;

use crate::errors::AppError;
use crate::providers::ollama::DEFAULT_GENERATE_URL;

// Application configuration module
// Settings are layered per value: command line flag, then environment
// variable, then a literal default. An empty value at any tier counts as unset.

/// Environment variable consulted for the generation endpoint
pub const LLM_HOST_ENV: &str = "STARTER_GO_CLI_LLM_HOST";

/// Environment variable consulted for the target locale
pub const TRANSLATION_LANGUAGE_ENV: &str = "STARTER_GO_CLI_TRANSLATION_LANGUAGE";

/// Locale used when neither flag nor environment provide one
pub const DEFAULT_TRANSLATION_LANGUAGE: &str = "en-US";

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    Flag,
    Environment,
    Default,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

/// Values given on the command line; `None` means the flag was not passed
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub llm_host: Option<String>,
    pub translation_language: Option<String>,
    pub lenient_json: bool,
}

/// Represents the application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Full URL of the generation endpoint
    pub llm_host: String,

    /// Where `llm_host` came from
    pub llm_host_source: SettingSource,

    /// Locale the segments are translated into, e.g. `en-US`
    pub translation_language: String,

    /// Where `translation_language` came from
    pub translation_language_source: SettingSource,

    /// Accept a segmentation answer with text around the JSON array
    pub lenient_json: bool,
}

/// Three-tier lookup: `flag`, then `env_var` through `lookup_env`, then `default`.
pub fn resolve_setting_with<F>(flag: Option<&str>, env_var: &str, default: &str, lookup_env: F) -> (String, SettingSource)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return (value.to_string(), SettingSource::Flag);
    }

    if let Some(value) = lookup_env(env_var).filter(|v| !v.is_empty()) {
        return (value, SettingSource::Environment);
    }

    (default.to_string(), SettingSource::Default)
}

/// Three-tier lookup against the process environment.
pub fn resolve_setting(flag: Option<&str>, env_var: &str, default: &str) -> (String, SettingSource) {
    resolve_setting_with(flag, env_var, default, |name| std::env::var(name).ok())
}

impl Config {
    /// Resolve the configuration against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve the configuration with a custom environment lookup.
    pub fn resolve_with<F>(overrides: &ConfigOverrides, lookup_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (llm_host, llm_host_source) = resolve_setting_with(
            overrides.llm_host.as_deref(),
            LLM_HOST_ENV,
            DEFAULT_GENERATE_URL,
            &lookup_env,
        );
        if llm_host_source == SettingSource::Default {
            info!("Using default Ollama host: {}", llm_host);
        }

        let (translation_language, translation_language_source) = resolve_setting_with(
            overrides.translation_language.as_deref(),
            TRANSLATION_LANGUAGE_ENV,
            DEFAULT_TRANSLATION_LANGUAGE,
            &lookup_env,
        );
        if translation_language_source == SettingSource::Default {
            info!("Using default translation language: {}", translation_language);
        }

        Self {
            llm_host,
            llm_host_source,
            translation_language,
            translation_language_source,
            lenient_json: overrides.lenient_json,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.llm_host)
            .map_err(|e| AppError::Input(format!("Invalid llm-host '{}': {}", self.llm_host, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Input(format!(
                "Invalid llm-host '{}': scheme must be http or https",
                self.llm_host
            )));
        }

        if self.translation_language.trim().is_empty() {
            return Err(AppError::Input("Translation language must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            llm_host: DEFAULT_GENERATE_URL.to_string(),
            llm_host_source: SettingSource::Default,
            translation_language: DEFAULT_TRANSLATION_LANGUAGE.to_string(),
            translation_language_source: SettingSource::Default,
            lenient_json: false,
        }
    }
}
