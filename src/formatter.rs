use crate::domain::Ingredient;

/// Sent to the model in place of a list when the pantry is empty.
pub const NO_INGREDIENTS: &str = "재료 없음";

/// Renders the pantry as a numbered list, one ingredient per line, e.g.
/// `1. 계란 (유제품) - 수량: 2개`.  The quantity text goes through as stored.
pub fn format_ingredients_for_prompt(ingredients: &[Ingredient]) -> String {
    if ingredients.is_empty() {
        return NO_INGREDIENTS.to_string();
    }

    ingredients
        .iter()
        .enumerate()
        .map(|(i, ingredient)| {
            format!(
                "{}. {} ({}) - 수량: {}개\n",
                i + 1,
                ingredient.name,
                ingredient.group,
                ingredient.number
            )
        })
        .collect()
}
