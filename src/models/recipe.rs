//! Recipe model
//!
//! One selected recipe: its parsed ingredients, the serving count the user
//! is looking at, and values derived from both.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::parsing;
use crate::storage::settings::AppSettings;
use crate::types::{Ingredient, LikedRecipe};

/// Recipe construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("Invalid recipe data: {0}")]
    InvalidRecipeData(String),
}

/// Direction of a serving-count change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsDirection {
    Increase,
    Decrease,
}

/// A recipe with parsed ingredients and an adjustable serving count
#[derive(Debug, Clone, Serialize)]
pub struct RecipeModel {
    id: String,
    title: String,
    author: String,
    image_url: String,
    source_url: Option<String>,
    source_servings: u32,
    current_servings: u32,
    prep_time_minutes: u32,
    ingredients: Vec<Ingredient>,
}

impl RecipeModel {
    /// Build a recipe from a raw API payload using default settings
    pub fn from_payload(payload: &Value) -> Result<Self, RecipeError> {
        Self::from_payload_with(payload, &AppSettings::default())
    }

    /// Build a recipe from a raw API payload
    ///
    /// Accepts the API's field names (`recipe_id`, `publisher`) as well as
    /// `id`/`author`. Ingredient lines that fail to parse are skipped and
    /// logged; the rest of the recipe is kept.
    pub fn from_payload_with(payload: &Value, settings: &AppSettings) -> Result<Self, RecipeError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| RecipeError::InvalidRecipeData("payload is not an object".to_string()))?;

        let id = obj
            .get("recipe_id")
            .or_else(|| obj.get("id"))
            .and_then(id_string)
            .ok_or_else(|| missing("recipe_id"))?;
        let title = required_str(obj, &["title"])?;
        let author = required_str(obj, &["publisher", "author"])?;
        let image_url = required_str(obj, &["image_url"])?;
        let source_url = obj
            .get("source_url")
            .and_then(Value::as_str)
            .map(str::to_string);

        let lines = obj
            .get("ingredients")
            .and_then(Value::as_array)
            .ok_or_else(|| missing("ingredients"))?;

        let mut ingredients = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let line = line
                .as_str()
                .ok_or_else(|| invalid(format!("ingredient {} is not a string", index)))?;
            match parsing::parse(line) {
                Ok(ingredient) => ingredients.push(ingredient),
                Err(e) => tracing::warn!("Skipping ingredient {} of recipe {}: {}", index, id, e),
            }
        }

        let source_servings = match obj.get("servings") {
            None | Some(Value::Null) => settings.default_servings.max(1),
            Some(value) => value
                .as_u64()
                .filter(|&n| n >= 1)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| invalid("servings must be a positive integer".to_string()))?,
        };

        let prep_time_minutes = match obj.get("cooking_time").and_then(Value::as_u64) {
            Some(minutes) => u32::try_from(minutes).unwrap_or(u32::MAX),
            None => estimate_time(ingredients.len(), settings.minutes_per_ingredient_group),
        };

        tracing::debug!(
            "Created recipe {} with {} ingredients, {} servings",
            id,
            ingredients.len(),
            source_servings
        );

        Ok(Self {
            id,
            title,
            author,
            image_url,
            source_url,
            source_servings,
            current_servings: source_servings,
            prep_time_minutes,
            ingredients,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn source_servings(&self) -> u32 {
        self.source_servings
    }

    pub fn current_servings(&self) -> u32 {
        self.current_servings
    }

    pub fn prep_time_minutes(&self) -> u32 {
        self.prep_time_minutes
    }

    /// Ingredients as parsed, for the source serving count
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Factor applied to every quantity for the current serving count
    pub fn servings_ratio(&self) -> f64 {
        self.current_servings as f64 / self.source_servings as f64
    }

    /// Ingredients rescaled to the current serving count
    pub fn scaled_ingredients(&self) -> Vec<Ingredient> {
        let ratio = self.servings_ratio();
        self.ingredients.iter().map(|i| i.scaled(ratio)).collect()
    }

    /// Step the serving count by one
    ///
    /// Returns whether the count changed. Servings never drop below 1.
    pub fn update_servings(&mut self, direction: ServingsDirection) -> bool {
        let next = match direction {
            ServingsDirection::Increase => self.current_servings.saturating_add(1),
            ServingsDirection::Decrease if self.current_servings > 1 => self.current_servings - 1,
            ServingsDirection::Decrease => return false,
        };
        let changed = next != self.current_servings;
        self.current_servings = next;
        changed
    }

    /// Summary record for the favorites store
    pub fn liked_recipe(&self) -> LikedRecipe {
        LikedRecipe::new(&self.id, &self.title, &self.author, &self.image_url)
    }
}

/// 15 minutes (by default) for every started group of three ingredients
fn estimate_time(ingredient_count: usize, minutes_per_group: u32) -> u32 {
    let groups = ingredient_count.div_ceil(3);
    u32::try_from(groups)
        .unwrap_or(u32::MAX)
        .saturating_mul(minutes_per_group)
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_str(obj: &serde_json::Map<String, Value>, keys: &[&'static str]) -> Result<String, RecipeError> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| missing(keys[0]))
}

fn missing(field: &str) -> RecipeError {
    RecipeError::InvalidRecipeData(format!("missing or invalid field '{}'", field))
}

fn invalid(reason: String) -> RecipeError {
    RecipeError::InvalidRecipeData(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CanonicalUnit;
    use serde_json::json;

    fn pizza_payload() -> Value {
        json!({
            "recipe_id": "47746",
            "title": "Best Pizza Dough Ever",
            "publisher": "101 Cookbooks",
            "image_url": "http://example.com/pizza.jpg",
            "source_url": "http://example.com/pizza",
            "ingredients": [
                "4 1/2 cups (20.25 ounces) unbleached high-gluten flour",
                "1 3/4 teaspoons salt",
                "1 teaspoon instant yeast",
                "1/4 cup olive oil",
                "1 3/4 cups water, ice cold",
                "Semolina flour OR cornmeal for dusting"
            ]
        })
    }

    #[test]
    fn test_create_from_payload() {
        let recipe = RecipeModel::from_payload(&pizza_payload()).unwrap();

        assert_eq!(recipe.id(), "47746");
        assert_eq!(recipe.title(), "Best Pizza Dough Ever");
        assert_eq!(recipe.author(), "101 Cookbooks");
        assert_eq!(recipe.source_url(), Some("http://example.com/pizza"));
        assert_eq!(recipe.ingredients().len(), 6);
        assert_eq!(recipe.source_servings(), 4);
        assert_eq!(recipe.current_servings(), 4);

        let flour = &recipe.ingredients()[0];
        assert_eq!(flour.quantity, Some(4.5));
        assert_eq!(flour.unit, Some(CanonicalUnit::Cup));
        assert_eq!(flour.name, "unbleached high-gluten flour");

        let dusting = &recipe.ingredients()[5];
        assert_eq!(dusting.quantity, None);
    }

    #[test]
    fn test_time_estimate() {
        // 6 ingredients -> 2 groups of three -> 30 minutes
        let recipe = RecipeModel::from_payload(&pizza_payload()).unwrap();
        assert_eq!(recipe.prep_time_minutes(), 30);

        assert_eq!(estimate_time(0, 15), 0);
        assert_eq!(estimate_time(1, 15), 15);
        assert_eq!(estimate_time(7, 15), 45);
    }

    #[test]
    fn test_payload_time_and_servings_win() {
        let mut payload = pizza_payload();
        payload["servings"] = json!(2);
        payload["cooking_time"] = json!(90);

        let recipe = RecipeModel::from_payload(&payload).unwrap();
        assert_eq!(recipe.source_servings(), 2);
        assert_eq!(recipe.prep_time_minutes(), 90);
    }

    #[test]
    fn test_alternate_field_names() {
        let payload = json!({
            "id": 12,
            "title": "Soup",
            "author": "Me",
            "image_url": "",
            "ingredients": ["1 onion"]
        });

        let recipe = RecipeModel::from_payload(&payload).unwrap();
        assert_eq!(recipe.id(), "12");
        assert_eq!(recipe.author(), "Me");
    }

    #[test]
    fn test_missing_fields_fail() {
        for field in ["recipe_id", "title", "publisher", "image_url", "ingredients"] {
            let mut payload = pizza_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = RecipeModel::from_payload(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn test_invalid_values_fail() {
        let mut payload = pizza_payload();
        payload["servings"] = json!(0);
        assert!(RecipeModel::from_payload(&payload).is_err());

        let mut payload = pizza_payload();
        payload["ingredients"] = json!(["1 cup sugar", 42]);
        assert!(RecipeModel::from_payload(&payload).is_err());

        assert!(RecipeModel::from_payload(&json!("not an object")).is_err());
    }

    #[test]
    fn test_blank_ingredient_lines_are_skipped() {
        let mut payload = pizza_payload();
        payload["ingredients"] = json!(["1 cup sugar", "   ", "(optional)", "2 eggs"]);

        let recipe = RecipeModel::from_payload(&payload).unwrap();
        let names: Vec<&str> = recipe.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["sugar", "eggs"]);
    }

    #[test]
    fn test_scaled_at_source_servings_is_identity() {
        let recipe = RecipeModel::from_payload(&pizza_payload()).unwrap();
        assert_eq!(recipe.scaled_ingredients(), recipe.ingredients().to_vec());
    }

    #[test]
    fn test_scaling() {
        let mut recipe = RecipeModel::from_payload(&pizza_payload()).unwrap();
        for _ in 0..4 {
            assert!(recipe.update_servings(ServingsDirection::Increase));
        }
        assert_eq!(recipe.current_servings(), 8);

        let scaled = recipe.scaled_ingredients();
        assert_eq!(scaled[0].quantity, Some(9.0));
        assert_eq!(scaled[3].quantity, Some(0.5));
        assert_eq!(scaled[5].quantity, None);
        assert_eq!(scaled[0].unit, recipe.ingredients()[0].unit);
        assert_eq!(scaled[0].name, recipe.ingredients()[0].name);

        // the parsed ingredients themselves never change
        assert_eq!(recipe.ingredients()[0].quantity, Some(4.5));
    }

    #[test]
    fn test_decrease_stops_at_one() {
        let mut payload = pizza_payload();
        payload["servings"] = json!(2);
        let mut recipe = RecipeModel::from_payload(&payload).unwrap();

        assert!(recipe.update_servings(ServingsDirection::Decrease));
        assert_eq!(recipe.current_servings(), 1);

        assert!(!recipe.update_servings(ServingsDirection::Decrease));
        assert_eq!(recipe.current_servings(), 1);
    }

    #[test]
    fn test_liked_recipe_projection() {
        let recipe = RecipeModel::from_payload(&pizza_payload()).unwrap();
        let like = recipe.liked_recipe();
        assert_eq!(like.id, "47746");
        assert_eq!(like.author, "101 Cookbooks");
    }
}
