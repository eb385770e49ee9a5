use std::env;

use thiserror::Error;

use crate::cleaner::RankKey;
use crate::report_writer::SchemaVariant;
use crate::search_client::TimeRange;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable '{0}'")]
    MissingVar(String),
    #[error("invalid value '{value}' for environment variable '{name}'")]
    InvalidVar { name: String, value: String },
}

/// Reddit API credentials, loaded from the environment (a .env file works
/// through dotenvy). Variable names match the script this tool replaced.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(RedditCredentials {
            client_id: require_var("client_id")?,
            client_secret: require_var("client_secret")?,
            user_agent: require_var("user_agent")?,
        })
    }
}

/// One run's parameters, built once by the caller. The pipeline itself never
/// prompts; everything interactive stays in the binary.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_name: String,
    pub time_range: TimeRange,
    pub rank_key: RankKey,
    pub engagement_threshold: Option<i64>,
    pub schema: SchemaVariant,
    pub search_limit: u32,
}

impl RunConfig {
    /// Combines the prompted values with the optional variant variables
    /// RANK_KEY, SCHEMA, MIN_ENGAGEMENT and SEARCH_LIMIT.
    pub fn from_env(output_name: String, time_range: TimeRange) -> Result<Self, ConfigError> {
        let rank_key = match optional_var("RANK_KEY") {
            None => RankKey::Score,
            Some(v) => match v.to_lowercase().as_str() {
                "score" => RankKey::Score,
                "engagement" => RankKey::Engagement,
                _ => return Err(invalid("RANK_KEY", v)),
            },
        };

        let schema = match optional_var("SCHEMA") {
            None => SchemaVariant::Base,
            Some(v) => match v.to_lowercase().as_str() {
                "base" => SchemaVariant::Base,
                "extended" => SchemaVariant::Extended,
                _ => return Err(invalid("SCHEMA", v)),
            },
        };

        let engagement_threshold = match optional_var("MIN_ENGAGEMENT") {
            None => None,
            Some(v) => Some(v.parse::<i64>().map_err(|_| invalid("MIN_ENGAGEMENT", v))?),
        };

        let search_limit = match optional_var("SEARCH_LIMIT") {
            None => 100,
            Some(v) => v.parse::<u32>().map_err(|_| invalid("SEARCH_LIMIT", v))?,
        };

        Ok(RunConfig {
            output_name,
            time_range,
            rank_key,
            engagement_threshold,
            schema,
            search_limit,
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn invalid(name: &str, value: String) -> ConfigError {
    ConfigError::InvalidVar {
        name: name.to_string(),
        value,
    }
}
