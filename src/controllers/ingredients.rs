use actix_web::{web, HttpResponse};
use mockall_double::double;
use serde::Serialize;
use tracing::{info, warn};

use super::RecipeResponse;
use crate::app::RecipeApp;
#[double]
use crate::database::Database;
use crate::domain::Ingredient;

#[derive(Serialize, Debug)]
struct IngredientsResponse {
    success: bool,
    ingredients: Vec<Ingredient>,
    count: usize,
}

pub struct IngredientsController {
    pub db: &'static Database,
}

impl IngredientsController {
    pub fn new(db: &'static Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> HttpResponse {
        match self.db.get_all_ingredients().await {
            Ok(ingredients) => {
                info!("listing {} ingredients", ingredients.len());
                HttpResponse::Ok().json(IngredientsResponse {
                    success: true,
                    count: ingredients.len(),
                    ingredients,
                })
            }
            Err(e) => {
                warn!("Error getting ingredients: {e}");
                HttpResponse::InternalServerError()
                    .json(RecipeResponse::failed("Failed to get ingredients"))
            }
        }
    }
}

pub async fn list_ingredients_handler(app: web::Data<&'static RecipeApp>) -> HttpResponse {
    app.ingredients_controller.list().await
}
