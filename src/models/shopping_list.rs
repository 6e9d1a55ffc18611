//! Shopping list
//!
//! Ingredients from one or more recipes accumulate here as independent,
//! individually addressable entries. Entries with the same name are never
//! merged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CanonicalUnit, Ingredient};

/// A single shopping list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Unique ID
    pub id: String,
    pub quantity: Option<f64>,
    pub unit: Option<CanonicalUnit>,
    pub name: String,
}

/// Ordered collection of shopping list entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry and return it
    pub fn add_item(
        &mut self,
        quantity: Option<f64>,
        unit: Option<CanonicalUnit>,
        name: impl Into<String>,
    ) -> ShoppingListItem {
        let item = ShoppingListItem {
            id: Uuid::new_v4().to_string(),
            quantity,
            unit,
            name: name.into(),
        };
        tracing::debug!("Added list item {} ({})", item.id, item.name);
        self.items.push(item.clone());
        item
    }

    /// Append one entry per ingredient, in order
    pub fn add_ingredients(&mut self, ingredients: &[Ingredient]) -> Vec<ShoppingListItem> {
        ingredients
            .iter()
            .map(|i| self.add_item(i.quantity, i.unit, i.name.clone()))
            .collect()
    }

    /// Remove an entry by ID
    ///
    /// Unknown IDs are ignored; a repeated delete is harmless.
    pub fn delete_item(&mut self, id: &str) -> Option<ShoppingListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        tracing::debug!("Deleted list item {}", id);
        Some(removed)
    }

    /// Set the quantity of an entry
    ///
    /// Zero, negative and non-finite amounts are rejected and leave the entry
    /// untouched. Returns whether the entry was updated.
    pub fn update_count(&mut self, id: &str, quantity: f64) -> bool {
        if !quantity.is_finite() || quantity <= 0.0 {
            tracing::debug!("Rejected count {} for list item {}", quantity, id);
            return false;
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = Some(quantity);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Entries in insertion order
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
