//! Configuration objects.
//!
//! `EngineConfig` carries every weight and threshold of the classifier and is
//! built once at startup. `AppConfig` adds the collaborator settings read from
//! the environment (a `.env` file is honoured by the binary).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use url::Url;
use validator::{Validate, ValidationError};

use crate::brain::language::Language;
use crate::error::AppError;

/// Contribution of each scoring rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_weights"))]
pub struct RuleWeights {
    #[validate(range(min = 0.0, max = 2.0))]
    pub recruiting: f32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub generic_opener: f32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub commercial_tone: f32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub buzzword_density: f32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub cold_outreach: f32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub commercial_pitch: f32,
    /// Negative: authentic tone lowers the score
    pub authentic_tone: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            recruiting: 0.6,
            generic_opener: 0.4,
            commercial_tone: 0.3,
            buzzword_density: 0.3,
            cold_outreach: 0.3,
            commercial_pitch: 0.4,
            authentic_tone: -0.2,
        }
    }
}

fn validate_weights(weights: &RuleWeights) -> Result<(), ValidationError> {
    if !(-2.0..=0.0).contains(&weights.authentic_tone) {
        return Err(ValidationError::new("authentic_tone_weight_must_be_negative"));
    }
    Ok(())
}

/// Decision thresholds and rule trigger levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_thresholds"))]
pub struct EngineThresholds {
    /// Spam threshold inside an existing thread
    #[validate(range(min = 0.0, max = 3.0))]
    pub reply: f32,
    /// Spam threshold for unsolicited contact
    #[validate(range(min = 0.0, max = 3.0))]
    pub cold: f32,
    /// Tone above this counts as commercial
    #[validate(range(min = 0.0, max = 1.0))]
    pub commercial_tone_above: f32,
    /// Tone below this counts as authentic
    #[validate(range(min = 0.0, max = 1.0))]
    pub authentic_tone_below: f32,
    /// Density above this is "high"
    #[validate(range(min = 0.0, max = 1.0))]
    pub density: f32,
    /// Raw buzzwords needed before density counts, unless a cold-outreach
    /// buzzword is present
    #[validate(range(min = 1))]
    pub density_min_buzzwords: usize,
    /// Messages with at most this many tokens are "short"
    #[validate(range(min = 1))]
    pub short_message_tokens: usize,
    /// Raw buzzword count that is "high" in a short message
    #[validate(range(min = 1))]
    pub short_message_buzzwords: usize,
    #[validate(range(min = 1))]
    pub cold_outreach_min: usize,
    #[validate(range(min = 1))]
    pub commercial_pitch_min: usize,
    /// Weight of one technical term in the density fraction
    #[validate(range(min = 0.0, max = 1.0))]
    pub technical_term_weight: f32,
}

impl Default for EngineThresholds {
    fn default() -> Self {
        Self {
            reply: 0.8,
            cold: 0.5,
            commercial_tone_above: 0.7,
            authentic_tone_below: 0.3,
            density: 0.10,
            density_min_buzzwords: 2,
            short_message_tokens: 40,
            short_message_buzzwords: 3,
            cold_outreach_min: 2,
            commercial_pitch_min: 2,
            technical_term_weight: 0.5,
        }
    }
}

fn validate_thresholds(thresholds: &EngineThresholds) -> Result<(), ValidationError> {
    if thresholds.reply < thresholds.cold {
        return Err(ValidationError::new("reply_threshold_below_cold_threshold"));
    }
    if thresholds.authentic_tone_below > thresholds.commercial_tone_above {
        return Err(ValidationError::new("tone_bands_overlap"));
    }
    Ok(())
}

/// Immutable classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    #[validate(nested)]
    pub weights: RuleWeights,
    #[validate(nested)]
    pub thresholds: EngineThresholds,
    /// Language used when detection is inconclusive
    pub fallback_language: Language,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: RuleWeights::default(),
            thresholds: EngineThresholds::default(),
            fallback_language: Language::English,
        }
    }
}

impl EngineConfig {
    /// Validate and return the configuration.
    pub fn validated(self) -> Result<Self, AppError> {
        self.validate()
            .map_err(|e| AppError::Config(format!("Invalid engine configuration: {}", e)))?;
        Ok(self)
    }
}

// --- Application configuration ---

const DEFAULT_MCPORTER_CMD: &str = "mcporter";
const DEFAULT_BEEPER_SERVER: &str = "beeper";
const DEFAULT_ROOM_PATTERN: &str = "linkedin";
const DEFAULT_LOG_FILE: &str = "~/logs/linkedin-prospection.log";
const DEFAULT_STATE_FILE: &str = "~/.openclaw-linkedin-state.json";
const DEFAULT_BEEPER_MCP_URL: &str = "http://localhost:23373/v0/mcp";

/// Everything the binary needs, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub mcporter_cmd: String,
    pub beeper_server: String,
    pub room_pattern: String,
    pub log_file: PathBuf,
    pub state_file: PathBuf,
    pub beeper_mcp_url: Url,
    pub beeper_token: Option<String>,
    /// Template overrides from `RESPONSE_TEMPLATES`
    pub response_templates: HashMap<String, String>,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_f32_var(name: &str) -> Result<Option<f32>, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} is not a number ({}): {}", name, raw, e))),
        _ => Ok(None),
    }
}

/// Expand a leading `~/` using `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let mut engine = EngineConfig::default();

        if let Ok(code) = env::var("PROSPECTION_DEFAULT_LANGUAGE") {
            engine.fallback_language = Language::from_code(&code).ok_or_else(|| {
                AppError::Config(format!("PROSPECTION_DEFAULT_LANGUAGE: unsupported language '{}'", code))
            })?;
        }
        if let Some(cold) = parse_f32_var("PROSPECTION_COLD_THRESHOLD")? {
            engine.thresholds.cold = cold;
        }
        if let Some(reply) = parse_f32_var("PROSPECTION_REPLY_THRESHOLD")? {
            engine.thresholds.reply = reply;
        }
        let engine = engine.validated()?;

        let raw_url = var_or("BEEPER_MCP_URL", DEFAULT_BEEPER_MCP_URL);
        let beeper_mcp_url = Url::parse(&raw_url)
            .map_err(|e| AppError::Config(format!("BEEPER_MCP_URL is not a valid URL ({}): {}", raw_url, e)))?;

        let response_templates = match env::var("RESPONSE_TEMPLATES") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map_err(|e| AppError::Config(format!("RESPONSE_TEMPLATES is not a JSON object: {}", e)))?,
            _ => HashMap::new(),
        };

        Ok(Self {
            engine,
            mcporter_cmd: var_or("MCPORTER_CMD", DEFAULT_MCPORTER_CMD),
            beeper_server: var_or("BEEPER_SERVER", DEFAULT_BEEPER_SERVER),
            room_pattern: var_or("LINKEDIN_ROOM_PATTERN", DEFAULT_ROOM_PATTERN),
            log_file: expand_home(&var_or("LINKEDIN_LOG", DEFAULT_LOG_FILE)),
            state_file: expand_home(&var_or("LINKEDIN_STATE", DEFAULT_STATE_FILE)),
            beeper_mcp_url,
            beeper_token: env::var("BEEPER_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            response_templates,
        })
    }
}
