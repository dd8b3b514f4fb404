use self::{
    conversions::{document_to_ingredient, record_to_document, recipe_to_record},
    mongo::DocumentStore,
};
use crate::{domain::*, error::RecipeError};
use chrono::{SecondsFormat, Utc};
use mockall::automock;
use serde::Serialize;

pub mod conversions;
pub mod mongo;

pub const INGREDIENTS_COLLECTION: &str = "Ingredients";
pub const RECIPES_COLLECTION: &str = "Recipes";

/// A recipe which has been written, along with the id it was stored under.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StoredRecipe {
    pub id: String,
    pub recipe: Recipe,
}

pub struct Database {
    store: Box<dyn DocumentStore>,
}

impl Database {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[automock]
impl Database {
    pub async fn get_all_ingredients(&self) -> Result<Vec<Ingredient>, RecipeError> {
        let documents = self
            .store
            .list_documents(INGREDIENTS_COLLECTION)
            .await
            .map_err(RecipeError::Persistence)?;

        documents
            .into_iter()
            .map(document_to_ingredient)
            .collect::<anyhow::Result<Vec<Ingredient>>>()
            .map_err(RecipeError::Persistence)
    }

    /// Stamps the recipe with the current time and appends it to the
    /// recipe collection.
    pub async fn save_recipe(&self, recipe: Recipe) -> Result<StoredRecipe, RecipeError> {
        let now = timestamp_now();
        let recipe = Recipe {
            create_date_time: now.clone(),
            update_date_time: now,
            ..recipe
        };

        let document = record_to_document(recipe_to_record(&recipe));
        let id = self
            .store
            .insert_document(RECIPES_COLLECTION, document)
            .await
            .map_err(RecipeError::Persistence)?;

        Ok(StoredRecipe { id, recipe })
    }
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
