use crate::domain::*;
use anyhow::Context;
use mongodb::bson::{self, Bson, Document};

/// Lays a recipe out as the flat record that gets stored: scalar fields first,
/// then ingredients and cooking steps in index order.
pub fn recipe_to_record(recipe: &Recipe) -> Vec<(String, Bson)> {
    let mut record: Vec<(String, Bson)> = vec![
        ("recipe_name".into(), recipe.recipe_name.clone().into()),
        ("recipe_description".into(), recipe.recipe_description.clone().into()),
        ("recipe_difficulty".into(), recipe.recipe_difficulty.clone().into()),
        ("recipe_estimated_time".into(), recipe.recipe_estimated_time.clone().into()),
        (
            "recipe_ingredient_count".into(),
            Bson::Int64(recipe.recipe_ingredient_count as i64),
        ),
        (
            "recipe_step_count".into(),
            Bson::Int64(recipe.recipe_step_count as i64),
        ),
        ("recipe_is_marked".into(), Bson::Boolean(recipe.recipe_is_marked)),
        ("recipe_status".into(), recipe.recipe_status.clone().into()),
        ("createDateTime".into(), recipe.create_date_time.clone().into()),
        ("updateDateTime".into(), recipe.update_date_time.clone().into()),
    ];

    record.extend(
        recipe
            .ingredients
            .iter()
            .chain(recipe.cooking_steps.iter())
            .map(|(key, value)| (key.to_string(), Bson::String(value.to_string()))),
    );

    record
}

pub fn record_to_document(record: Vec<(String, Bson)>) -> Document {
    record.into_iter().collect()
}

pub fn document_to_ingredient(document: Document) -> anyhow::Result<Ingredient> {
    bson::from_document(document).with_context(|| "error converting document to ingredient")
}
