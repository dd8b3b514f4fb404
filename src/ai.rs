use self::{
    openai::ChatModel,
    prompts::{recipe::RecipePrompt, Prompt},
};
use crate::{domain::Recipe, error::RecipeError};
use mockall::automock;
use tracing::info;

pub mod openai;
pub mod prompts;

pub struct Ai {
    model: Box<dyn ChatModel>,
    model_name: String,
}

impl Ai {
    pub fn new(model: Box<dyn ChatModel>, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
        }
    }
}

#[automock]
impl Ai {
    /// Asks the model for a recipe built from the formatted pantry text and
    /// returns it flattened for storage.
    pub async fn generate_recipe(&self, ingredients_text: &str) -> Result<Recipe, RecipeError> {
        let prompt = RecipePrompt::new(ingredients_text, &self.model_name);
        let raw_response = self.execute(&prompt).await?;

        let generated = prompt.parse_response(&raw_response)?;
        info!(
            "model returned {} ingredients and {} steps",
            generated.ingredients.len(),
            generated.cooking_steps.len()
        );

        Ok(Recipe::from(generated))
    }
}

impl Ai {
    async fn execute(&self, prompt: &impl Prompt) -> Result<String, RecipeError> {
        let response = self
            .model
            .call_model(prompt.build_payload())
            .await
            .map_err(|e| RecipeError::ModelUnavailable(format!("{e:#}")))?;

        match response.first_content() {
            Some(content) => Ok(content.to_string()),
            None => Err(RecipeError::ModelUnavailable(String::from(
                "no response from model",
            ))),
        }
    }
}
