use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// Status code every freshly generated recipe starts with.
pub const RECIPE_STATUS_NEW: &str = "0";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ingredient {
    #[serde(rename = "_SUID", default)]
    pub suid: String,
    #[serde(rename = "ingredient_group", default)]
    pub group: String,
    #[serde(rename = "ingredient_name", default)]
    pub name: String,
    #[serde(rename = "ingredient_number", default)]
    pub number: String,
    #[serde(rename = "createDateTime", default)]
    pub create_date_time: String,
    #[serde(rename = "updateDateTime", default)]
    pub update_date_time: String,
}

impl Ingredient {
    pub fn new(name: &str, group: &str, number: &str) -> Self {
        Self {
            suid: String::new(),
            group: group.to_string(),
            name: name.to_string(),
            number: number.to_string(),
            create_date_time: String::new(),
            update_date_time: String::new(),
        }
    }
}

/// Parses the free text quantity of an ingredient.  Only a bare, optionally
/// signed integer is accepted; anything else (surrounding spaces included)
/// counts as a single item.
pub fn parse_ingredient_count(ingredient_number: &str) -> i64 {
    match ingredient_number.parse::<i64>() {
        Ok(count) => count,
        Err(_) => {
            warn!("unparseable ingredient quantity {ingredient_number:?}, defaulting to 1");
            1
        }
    }
}

// Model replies sometimes send null where a value belongs; treat it like a
// missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One stage of cooking, as the model returns it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CookingStep {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_steps: Vec<String>,
}

/// The nested recipe shape the model is asked to answer with.  It only lives
/// between parsing the model response and flattening it.  Missing or null
/// fields decode as empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GeneratedRecipe {
    #[serde(deserialize_with = "null_as_default")]
    pub recipe_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipe_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipe_difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipe_estimated_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cooking_steps: Vec<CookingStep>,
}

/// Ordered string pairs which serialize as a JSON object.  Insertion order is
/// kept so recipe_ingredient_10 stays after recipe_ingredient_9.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatFields(Vec<(String, String)>);

impl FlatFields {
    pub fn insert(&mut self, key: String, value: String) {
        self.0.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FlatFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

pub fn ingredient_key(i: usize) -> String {
    format!("recipe_ingredient_{i}")
}

pub fn step_title_key(i: usize) -> String {
    format!("recipe_step_{i}_title")
}

pub fn substep_key(i: usize, j: usize) -> String {
    format!("recipe_step_{i}_substep_{j}")
}

pub fn substep_count_key(i: usize) -> String {
    format!("recipe_step_{i}_substep_count")
}

/// A recipe in the flat shape it is stored in.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recipe {
    pub recipe_name: String,
    pub recipe_description: String,
    pub recipe_difficulty: String,
    pub recipe_estimated_time: String,
    pub ingredients: FlatFields,
    pub recipe_ingredient_count: usize,
    pub cooking_steps: FlatFields,
    pub recipe_step_count: usize,
    pub recipe_is_marked: bool,
    pub recipe_status: String,
    #[serde(rename = "createDateTime")]
    pub create_date_time: String,
    #[serde(rename = "updateDateTime")]
    pub update_date_time: String,
}

impl From<GeneratedRecipe> for Recipe {
    fn from(generated: GeneratedRecipe) -> Self {
        let mut ingredients = FlatFields::default();
        for (i, ingredient) in generated.ingredients.iter().enumerate() {
            ingredients.insert(ingredient_key(i), ingredient.clone());
        }

        let mut cooking_steps = FlatFields::default();
        for (i, step) in generated.cooking_steps.iter().enumerate() {
            cooking_steps.insert(step_title_key(i), step.title.clone());
            for (j, sub_step) in step.sub_steps.iter().enumerate() {
                cooking_steps.insert(substep_key(i, j), sub_step.clone());
            }
            cooking_steps.insert(substep_count_key(i), step.sub_steps.len().to_string());
        }

        Recipe {
            recipe_ingredient_count: generated.ingredients.len(),
            recipe_step_count: generated.cooking_steps.len(),
            recipe_name: generated.recipe_name,
            recipe_description: generated.recipe_description,
            recipe_difficulty: generated.recipe_difficulty,
            recipe_estimated_time: generated.recipe_estimated_time,
            ingredients,
            cooking_steps,
            recipe_is_marked: false,
            recipe_status: RECIPE_STATUS_NEW.to_string(),
            create_date_time: String::new(),
            update_date_time: String::new(),
        }
    }
}

impl Recipe {
    /// Rebuilds the nested shape from the index encoded keys.  Returns None if
    /// a key implied by the counts is missing.
    pub fn regroup(&self) -> Option<GeneratedRecipe> {
        let ingredients = (0..self.recipe_ingredient_count)
            .map(|i| self.ingredients.get(&ingredient_key(i)).map(String::from))
            .collect::<Option<Vec<String>>>()?;

        let mut cooking_steps = vec![];
        for i in 0..self.recipe_step_count {
            let title = self.cooking_steps.get(&step_title_key(i))?.to_string();
            let substep_count: usize = self.cooking_steps.get(&substep_count_key(i))?.parse().ok()?;
            let sub_steps = (0..substep_count)
                .map(|j| self.cooking_steps.get(&substep_key(i, j)).map(String::from))
                .collect::<Option<Vec<String>>>()?;

            cooking_steps.push(CookingStep { title, sub_steps });
        }

        Some(GeneratedRecipe {
            recipe_name: self.recipe_name.clone(),
            recipe_description: self.recipe_description.clone(),
            recipe_difficulty: self.recipe_difficulty.clone(),
            recipe_estimated_time: self.recipe_estimated_time.clone(),
            ingredients,
            cooking_steps,
        })
    }
}
