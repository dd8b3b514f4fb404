use crate::ai::openai;
use crate::error::RecipeError;

pub mod recipe;

/// A prompt knows how to build a payload for an openai request
/// and how to parse the response.
pub trait Prompt {
    type Response;

    fn build_payload(&self) -> openai::ChatCompletionRequest;
    fn parse_response(&self, raw_response: &str) -> Result<Self::Response, RecipeError>;
}
