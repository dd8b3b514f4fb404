use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, App};
use mongodb::bson::{doc, Document};
use pantry_chef::ai::openai::{
    ChatCompletionMessage, ChatCompletionResponse, ChatCompletionResponseChoice, MockChatModel,
};
use pantry_chef::ai::Ai;
use pantry_chef::app::RecipeApp;
use pantry_chef::database::{mongo::MockDocumentStore, Database};

const MODEL_REPLY: &str = r#"```json
{
  "recipe_name": "Onion Omelette",
  "recipe_description": "Soft eggs with sweet onion.",
  "recipe_difficulty": "●●○○○",
  "recipe_estimated_time": "15분",
  "ingredients": ["egg - 2", "onion - 1", "salt - a pinch"],
  "cooking_steps": [
    {"title": "Prep", "sub_steps": ["Slice the onion", "Beat the eggs"]},
    {"title": "Cook", "sub_steps": ["Fry everything together"]}
  ]
}
```"#;

fn pantry() -> Vec<Document> {
    vec![
        doc! {
            "_SUID": "i-1",
            "ingredient_name": "egg",
            "ingredient_group": "dairy",
            "ingredient_number": "2",
            "createDateTime": "2024-05-01T09:30:00Z",
            "updateDateTime": "2024-05-01T09:30:00Z",
        },
        doc! {
            "_SUID": "i-2",
            "ingredient_name": "onion",
            "ingredient_group": "vegetable",
            "ingredient_number": "1",
            "createDateTime": "2024-05-01T09:30:00Z",
            "updateDateTime": "2024-05-01T09:30:00Z",
        },
    ]
}

fn model_reply(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![ChatCompletionResponseChoice {
            message: Some(ChatCompletionMessage {
                role: Some("assistant".to_string()),
                content: Some(content.to_string()),
            }),
        }],
    }
}

fn build_app(store: MockDocumentStore, model: MockChatModel) -> &'static RecipeApp {
    let db: &'static Database = Box::leak(Box::new(Database::new(Box::new(store))));
    let ai: &'static Ai = Box::leak(Box::new(Ai::new(Box::new(model), "gpt-4")));
    Box::leak(Box::new(RecipeApp::new(db, ai)))
}

#[actix_web::test]
async fn test_generate_recipe_end_to_end() {
    let saved: Arc<Mutex<Option<Document>>> = Arc::new(Mutex::new(None));

    let mut store = MockDocumentStore::new();
    store
        .expect_list_documents()
        .withf(|collection| collection == "Ingredients")
        .returning(|_| Ok(pantry()));
    let saved_clone = Arc::clone(&saved);
    store
        .expect_insert_document()
        .withf(|collection, _| collection == "Recipes")
        .times(1)
        .returning(move |_, document| {
            *saved_clone.lock().unwrap() = Some(document);
            Ok("665f1c2e9b1e8a3d4c2b1a00".to_string())
        });

    let mut model = MockChatModel::new();
    model
        .expect_call_model()
        .withf(|payload| {
            let prompt = payload.messages[1].content.as_deref().unwrap_or_default();
            prompt.contains("1. egg (dairy) - 수량: 2개")
                && prompt.contains("2. onion (vegetable) - 수량: 1개")
        })
        .times(1)
        .returning(|_| Ok(model_reply(MODEL_REPLY)));

    let app = test::init_service(App::new().configure(build_app(store, model).configure())).await;
    let request = test::TestRequest::post()
        .uri("/api/generate-recipe")
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response["success"], true);
    assert_eq!(
        response["message"],
        "Recipe successfully generated and saved with ID: 665f1c2e9b1e8a3d4c2b1a00"
    );
    assert_eq!(response["recipe"]["recipe_ingredient_count"], 3);
    assert_eq!(response["recipe"]["recipe_step_count"], 2);
    assert_eq!(
        response["recipe"]["cooking_steps"]["recipe_step_1_title"],
        "Cook"
    );

    let saved = saved.lock().unwrap().take().expect("recipe should be stored");
    assert_eq!(saved.get_i64("recipe_ingredient_count").unwrap(), 3);
    assert_eq!(saved.get_i64("recipe_step_count").unwrap(), 2);
    assert_eq!(saved.get_str("recipe_step_0_substep_count").unwrap(), "2");
    assert_eq!(saved.get_str("recipe_step_1_substep_count").unwrap(), "1");
    assert_eq!(saved.get_str("recipe_ingredient_2").unwrap(), "salt - a pinch");
    assert_eq!(saved.get_str("recipe_step_0_substep_1").unwrap(), "Beat the eggs");
    assert_eq!(saved.get_str("recipe_status").unwrap(), "0");
    assert!(!saved.get_bool("recipe_is_marked").unwrap());
    assert_eq!(
        saved.get_str("createDateTime").unwrap(),
        saved.get_str("updateDateTime").unwrap()
    );
}

#[actix_web::test]
async fn test_empty_pantry_never_calls_model() {
    let mut store = MockDocumentStore::new();
    store.expect_list_documents().returning(|_| Ok(vec![]));
    store.expect_insert_document().times(0);

    let mut model = MockChatModel::new();
    model.expect_call_model().times(0);

    let app = test::init_service(App::new().configure(build_app(store, model).configure())).await;
    let request = test::TestRequest::post()
        .uri("/api/generate-recipe")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_model_reply_stores_nothing() {
    let mut store = MockDocumentStore::new();
    store.expect_list_documents().returning(|_| Ok(pantry()));
    store.expect_insert_document().times(0);

    let mut model = MockChatModel::new();
    model
        .expect_call_model()
        .returning(|_| Ok(model_reply("I would suggest an omelette.")));

    let app = test::init_service(App::new().configure(build_app(store, model).configure())).await;
    let request = test::TestRequest::post()
        .uri("/api/generate-recipe")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to generate recipe");
}

#[actix_web::test]
async fn test_partial_model_reply_is_saved_with_empty_fields() {
    let saved: Arc<Mutex<Option<Document>>> = Arc::new(Mutex::new(None));

    let mut store = MockDocumentStore::new();
    store.expect_list_documents().returning(|_| Ok(pantry()));
    let saved_clone = Arc::clone(&saved);
    store
        .expect_insert_document()
        .times(1)
        .returning(move |_, document| {
            *saved_clone.lock().unwrap() = Some(document);
            Ok("665f1c2e9b1e8a3d4c2b1a01".to_string())
        });

    let mut model = MockChatModel::new();
    model.expect_call_model().returning(|_| {
        Ok(model_reply(
            r#"{"recipe_name": "Fried Egg", "cooking_steps": [{"title": "Cook", "sub_steps": null}]}"#,
        ))
    });

    let app = test::init_service(App::new().configure(build_app(store, model).configure())).await;
    let request = test::TestRequest::post()
        .uri("/api/generate-recipe")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let saved = saved.lock().unwrap().take().expect("recipe should be stored");
    assert_eq!(saved.get_str("recipe_description").unwrap(), "");
    assert_eq!(saved.get_i64("recipe_ingredient_count").unwrap(), 0);
    assert_eq!(saved.get_i64("recipe_step_count").unwrap(), 1);
    assert_eq!(saved.get_str("recipe_step_0_substep_count").unwrap(), "0");
}

#[actix_web::test]
async fn test_list_ingredients() {
    let mut store = MockDocumentStore::new();
    store.expect_list_documents().returning(|_| Ok(pantry()));

    let app = test::init_service(
        App::new().configure(build_app(store, MockChatModel::new()).configure()),
    )
    .await;
    let request = test::TestRequest::get().uri("/api/ingredients").to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["count"], 2);
    assert_eq!(response["ingredients"][0]["_SUID"], "i-1");
    assert_eq!(response["ingredients"][1]["ingredient_name"], "onion");
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(
        App::new().configure(build_app(MockDocumentStore::new(), MockChatModel::new()).configure()),
    )
    .await;
    let request = test::TestRequest::get().uri("/health").to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response, serde_json::json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn test_wrong_methods_are_not_allowed() {
    let app = test::init_service(
        App::new().configure(build_app(MockDocumentStore::new(), MockChatModel::new()).configure()),
    )
    .await;

    let post_ingredients = test::TestRequest::post().uri("/api/ingredients").to_request();
    let response = test::call_service(&app, post_ingredients).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let get_generate = test::TestRequest::get()
        .uri("/api/generate-recipe")
        .to_request();
    let response = test::call_service(&app, get_generate).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
