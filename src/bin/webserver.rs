use pantry_chef::ai::{openai::OpenAI, Ai};
use pantry_chef::app::RecipeApp;
use pantry_chef::config::Config;
use pantry_chef::database::{mongo::MongoDocumentStore, Database};
use tracing::{error, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    if dotenv::dotenv().is_err() {
        warn!(".env file not found, using system environment variables");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let store = match MongoDocumentStore::connect(&config.credentials).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize database: {e:#}");
            std::process::exit(1);
        }
    };

    // Both handles live for the whole process and are shared by every worker.
    let db: &'static Database = Box::leak(Box::new(Database::new(Box::new(store))));
    let open_ai = OpenAI::new(config.openai_api_key.clone(), config.model_timeout);
    let ai: &'static Ai = Box::leak(Box::new(Ai::new(Box::new(open_ai), &config.openai_model)));

    let app: &'static RecipeApp = Box::leak(Box::new(RecipeApp::new(db, ai)));
    app.start(config.port).await
}
