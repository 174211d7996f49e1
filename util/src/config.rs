//! Configuration for the optional AI-assisted grading layer.
//!
//! [`AssistConfig`] is a plain value handed to whichever assistant strategy a caller
//! constructs. It is never stored in a process-wide slot: callers build one (from
//! defaults, JSON, or the environment) and pass it down explicitly. The deterministic
//! grading engine does not read it at all.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Placeholder prefix used by `.env` templates; keys starting with it are treated as unset.
const PLACEHOLDER_KEY_PREFIX: &str = "your_";

/// LLM provider backing the assisted grading layer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssistProvider {
    Groq,
    Anthropic,
    OpenAi,
}

impl AssistProvider {
    /// Model used for grading when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            AssistProvider::Groq => "llama-3.3-70b-versatile",
            AssistProvider::Anthropic => "claude-3-haiku-20240307",
            AssistProvider::OpenAi => "gpt-3.5-turbo",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "groq" => Some(AssistProvider::Groq),
            "anthropic" => Some(AssistProvider::Anthropic),
            "openai" => Some(AssistProvider::OpenAi),
            _ => None,
        }
    }
}

/// Settings for the AI-assisted grading layer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AssistConfig {
    /// Master switch. When false the pipeline never calls an assistant.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_provider")]
    pub provider: AssistProvider,

    /// Model name; `None` means the provider's default grading model.
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on a single assisted grading call before the pipeline falls back.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AssistConfig {
    /// Builds the configuration from `.env` and environment variables.
    ///
    /// Recognised variables: `GRADER_ASSIST_ENABLED`, `GRADER_ASSIST_PROVIDER`,
    /// `GRADER_ASSIST_MODEL`, `GRADER_ASSIST_API_KEY`, `GRADER_ASSIST_TIMEOUT_SECS`.
    /// Values that fail to parse are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let enabled = match env::var("GRADER_ASSIST_ENABLED") {
            Ok(raw) => matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            Err(_) => defaults.enabled,
        };

        let provider = match env::var("GRADER_ASSIST_PROVIDER") {
            Ok(raw) => AssistProvider::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unknown GRADER_ASSIST_PROVIDER, using default");
                defaults.provider
            }),
            Err(_) => defaults.provider,
        };

        let timeout_secs = match env::var("GRADER_ASSIST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid GRADER_ASSIST_TIMEOUT_SECS, using default");
                defaults.timeout_secs
            }),
            Err(_) => defaults.timeout_secs,
        };

        Self {
            enabled,
            provider,
            model: env::var("GRADER_ASSIST_MODEL").ok().filter(|m| !m.trim().is_empty()),
            api_key: env::var("GRADER_ASSIST_API_KEY").ok(),
            timeout_secs,
        }
    }

    /// The model to request, falling back to the provider default.
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// True when an API key is present and is not a template placeholder.
    pub fn has_usable_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|k| !k.is_empty() && !k.starts_with(PLACEHOLDER_KEY_PREFIX))
    }

    /// Whether an assisted grading attempt should be made at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.has_usable_key()
    }
}

fn default_provider() -> AssistProvider {
    AssistProvider::Groq
}

fn default_timeout_secs() -> u64 {
    30
}
