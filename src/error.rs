use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("missing configuration: {0}")]
    ConfigurationMissing(String),
    #[error("persistence error: {0:#}")]
    Persistence(anyhow::Error),
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("malformed model output: {reason}\nResponse: {raw}")]
    MalformedModelOutput { reason: String, raw: String },
    #[error("no ingredients available")]
    NoIngredientsAvailable,
}

impl RecipeError {
    /// Only a missing pantry is the caller's problem, everything else is ours.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecipeError::NoIngredientsAvailable => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ingredients_is_a_client_error() {
        assert_eq!(
            RecipeError::NoIngredientsAvailable.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        let errors = vec![
            RecipeError::Persistence(anyhow::anyhow!("write failed")),
            RecipeError::ModelUnavailable("timeout".to_string()),
            RecipeError::MalformedModelOutput {
                reason: "eof".to_string(),
                raw: "{".to_string(),
            },
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_malformed_output_keeps_raw_text() {
        let error = RecipeError::MalformedModelOutput {
            reason: "expected value".to_string(),
            raw: "not json".to_string(),
        };

        assert!(error.to_string().contains("Response: not json"));
    }
}
