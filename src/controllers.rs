use actix_web::HttpResponse;
use serde::Serialize;

use crate::database::StoredRecipe;
use crate::domain::Recipe;

pub mod health;
pub mod ingredients;
pub mod recipes;

/// Body shared by every recipe endpoint response.
#[derive(Serialize, Debug)]
pub struct RecipeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

impl RecipeResponse {
    pub fn saved(stored: StoredRecipe) -> Self {
        Self {
            success: true,
            message: format!(
                "Recipe successfully generated and saved with ID: {}",
                stored.id
            ),
            recipe: Some(stored.recipe),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            recipe: None,
        }
    }
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().body("Method not allowed")
}
