use crate::controllers::{
    health::health_handler,
    ingredients::{list_ingredients_handler, IngredientsController},
    method_not_allowed,
    recipes::{generate_recipe_handler, RecipesController},
};
#[double]
use crate::ai::Ai;
#[double]
use crate::database::Database;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use mockall_double::double;
use tracing::info;

pub struct RecipeApp {
    pub ingredients_controller: IngredientsController,
    pub recipes_controller: RecipesController,
}

impl RecipeApp {
    pub fn new(db: &'static Database, ai: &'static Ai) -> Self {
        Self {
            ingredients_controller: IngredientsController::new(db),
            recipes_controller: RecipesController::new(db, ai),
        }
    }

    /// Registers app state and every route.  Shared by the server and tests.
    pub fn configure(&'static self) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg: &mut web::ServiceConfig| {
            cfg.app_data(web::Data::new(self))
                .route("/health", web::get().to(health_handler))
                .service(
                    web::resource("/api/ingredients")
                        .route(web::get().to(list_ingredients_handler))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/api/generate-recipe")
                        .route(web::post().to(generate_recipe_handler))
                        .default_service(web::to(method_not_allowed)),
                );
        }
    }

    pub async fn start(&'static self, port: u16) -> std::io::Result<()> {
        info!("Server starting on port {port}...");

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header();

            App::new().wrap(cors).configure(self.configure())
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}
