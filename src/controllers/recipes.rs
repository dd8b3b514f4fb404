use std::fmt;

use actix_web::{web, HttpResponse};
use mockall_double::double;
use tracing::{info, warn};

use super::RecipeResponse;
#[double]
use crate::ai::Ai;
use crate::app::RecipeApp;
#[double]
use crate::database::Database;
use crate::{database::StoredRecipe, error::RecipeError, formatter};

/// Where a generate request is when it stops.  Requests move through these in
/// order; the only early exit is an empty pantry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationStage {
    FetchingIngredients,
    Formatting,
    GeneratingRecipe,
    Persisting,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStage::FetchingIngredients => "fetching ingredients",
            GenerationStage::Formatting => "formatting",
            GenerationStage::GeneratingRecipe => "generating recipe",
            GenerationStage::Persisting => "persisting",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub struct GenerationFailure {
    pub stage: GenerationStage,
    pub error: RecipeError,
}

impl GenerationFailure {
    fn at(stage: GenerationStage) -> impl FnOnce(RecipeError) -> Self {
        move |error| Self { stage, error }
    }

    /// The short message the client sees.  Details stay in the server log.
    fn message(&self) -> &'static str {
        match (&self.error, self.stage) {
            (RecipeError::NoIngredientsAvailable, _) => {
                "No ingredients found in the ingredient store"
            }
            (_, GenerationStage::FetchingIngredients) => "Failed to get ingredients",
            (_, GenerationStage::Formatting) | (_, GenerationStage::GeneratingRecipe) => {
                "Failed to generate recipe"
            }
            (_, GenerationStage::Persisting) => "Failed to save recipe",
        }
    }
}

pub struct RecipesController {
    pub db: &'static Database,
    pub ai: &'static Ai,
}

impl RecipesController {
    pub fn new(db: &'static Database, ai: &'static Ai) -> Self {
        Self { db, ai }
    }

    pub async fn generate(&self) -> HttpResponse {
        match self.run_generation().await {
            Ok(stored) => {
                info!("Recipe saved with ID: {}", stored.id);
                HttpResponse::Ok().json(RecipeResponse::saved(stored))
            }
            Err(failure) => {
                warn!("recipe generation failed while {}: {}", failure.stage, failure.error);
                HttpResponse::build(failure.error.status_code())
                    .json(RecipeResponse::failed(failure.message()))
            }
        }
    }

    async fn run_generation(&self) -> Result<StoredRecipe, GenerationFailure> {
        enter(GenerationStage::FetchingIngredients);
        let ingredients = self
            .db
            .get_all_ingredients()
            .await
            .map_err(GenerationFailure::at(GenerationStage::FetchingIngredients))?;

        if ingredients.is_empty() {
            return Err(GenerationFailure {
                stage: GenerationStage::FetchingIngredients,
                error: RecipeError::NoIngredientsAvailable,
            });
        }
        info!("Found {} ingredients", ingredients.len());

        enter(GenerationStage::Formatting);
        let ingredients_text = formatter::format_ingredients_for_prompt(&ingredients);
        info!("Ingredients formatted for prompt:\n{ingredients_text}");

        enter(GenerationStage::GeneratingRecipe);
        let recipe = self
            .ai
            .generate_recipe(&ingredients_text)
            .await
            .map_err(GenerationFailure::at(GenerationStage::GeneratingRecipe))?;
        info!("Recipe generated: {}", recipe.recipe_name);

        enter(GenerationStage::Persisting);
        self.db
            .save_recipe(recipe)
            .await
            .map_err(GenerationFailure::at(GenerationStage::Persisting))
    }
}

fn enter(stage: GenerationStage) {
    info!("recipe generation: {stage}");
}

pub async fn generate_recipe_handler(app: web::Data<&'static RecipeApp>) -> HttpResponse {
    app.recipes_controller.generate().await
}
