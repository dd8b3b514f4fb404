use std::{env, fs, time::Duration};

use crate::{database::mongo::MongoCredentials, error::RecipeError};

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub credentials: MongoCredentials,
    pub openai_api_key: String,
    pub openai_model: String,
    pub model_timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, RecipeError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable lookup, so tests don't need to
    /// touch the process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, RecipeError> {
        let var = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let credentials = load_credentials(
            var("MONGODB_CREDENTIALS_JSON"),
            var("MONGODB_CREDENTIALS_PATH"),
        )?;

        let openai_api_key = var("OPENAI_API_KEY").ok_or_else(|| {
            RecipeError::ConfigurationMissing(
                "OPENAI_API_KEY environment variable is required".to_string(),
            )
        })?;

        let model_timeout = match var("OPENAI_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                RecipeError::ConfigurationMissing(format!(
                    "OPENAI_TIMEOUT_SECS must be a whole number of seconds, was {secs:?}"
                ))
            })?),
            None => Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        };

        let port = match var("PORT") {
            Some(port) => port.trim().parse().map_err(|_| {
                RecipeError::ConfigurationMissing(format!("PORT must be a port number, was {port:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            credentials,
            openai_api_key,
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_timeout,
            port,
        })
    }
}

// Inline JSON wins over a file path, which suits hosts that only offer env vars.
fn load_credentials(
    inline_json: Option<String>,
    path: Option<String>,
) -> Result<MongoCredentials, RecipeError> {
    let json = match (inline_json, path) {
        (Some(json), _) => json,
        (None, Some(path)) => fs::read_to_string(&path).map_err(|e| {
            RecipeError::ConfigurationMissing(format!("cannot read credentials file {path}: {e}"))
        })?,
        (None, None) => {
            return Err(RecipeError::ConfigurationMissing(
                "MONGODB_CREDENTIALS_JSON or MONGODB_CREDENTIALS_PATH environment variable is required"
                    .to_string(),
            ))
        }
    };

    serde_json::from_str(&json)
        .map_err(|e| RecipeError::ConfigurationMissing(format!("invalid database credentials: {e}")))
}
