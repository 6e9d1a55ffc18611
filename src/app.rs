//! Application state
//!
//! Owns every store for one session and turns user actions into calls on
//! them. Fetches are split into a `begin_*` step that tags the request with
//! a generation and a `complete_*` step that only applies the result if no
//! newer request of the same kind has started since.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::api::{FetchError, RecipeRepository, SearchRepository};
use crate::models::{
    FavoritesStore, PageInfo, RecipeError, RecipeModel, SearchError, SearchResultSet,
    ServingsDirection, ShoppingList, ShoppingListItem,
};
use crate::storage::settings::AppSettings;
use crate::storage::{KeyValuePersistence, StorageError};
use crate::types::{Ingredient, LikedRecipe, SearchHit};

/// Application errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No recipe selected")]
    NoActiveRecipe,
    #[error("No search results")]
    NoActiveSearch,
    #[error("Search query is empty")]
    EmptyQuery,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Tag carried by an in-flight fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    target: String,
}

impl FetchTicket {
    /// Recipe ID or search query the fetch was started for
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Whether a completed fetch was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    /// A newer fetch started meanwhile; the result was dropped
    Stale,
}

/// Monotonic counter identifying the latest request of one kind
#[derive(Debug, Default)]
struct Generation(u64);

impl Generation {
    fn begin(&mut self, target: &str) -> FetchTicket {
        self.0 += 1;
        FetchTicket {
            generation: self.0,
            target: target.to_string(),
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.0
    }
}

/// A discrete user action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    IncreaseServings,
    DecreaseServings,
    /// Add every ingredient of the current recipe, scaled, to the list
    AddRecipeToList,
    DeleteListItem(String),
    UpdateListCount { id: String, quantity: f64 },
    ClearList,
    /// Like the current recipe, or unlike it if it is already liked
    ToggleLike,
    GoToPage(usize),
}

/// What changed, for the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Servings {
        changed: bool,
        servings: u32,
        ingredients: Vec<Ingredient>,
    },
    ItemsAdded(Vec<ShoppingListItem>),
    ItemDeleted(Option<ShoppingListItem>),
    CountUpdated { id: String, updated: bool },
    ListCleared,
    LikeToggled {
        liked: bool,
        recipe: LikedRecipe,
        count: usize,
    },
    Page { hits: Vec<SearchHit>, info: PageInfo },
}

/// All state for one session
pub struct AppState {
    pub settings: AppSettings,
    search: Option<SearchResultSet>,
    current_page: usize,
    recipe: Option<RecipeModel>,
    list: ShoppingList,
    likes: FavoritesStore,
    recipes: Arc<dyn RecipeRepository>,
    searches: Arc<dyn SearchRepository>,
    search_generation: Generation,
    recipe_generation: Generation,
}

impl AppState {
    /// Create the session state and restore liked recipes
    ///
    /// A failure to read stored likes is logged and the session starts with
    /// none.
    pub fn new(
        settings: AppSettings,
        recipes: Arc<dyn RecipeRepository>,
        searches: Arc<dyn SearchRepository>,
        persistence: Arc<dyn KeyValuePersistence>,
    ) -> Self {
        let mut likes = FavoritesStore::with_key(persistence, settings.likes_key.clone());
        if let Err(e) = likes.load() {
            tracing::warn!("Failed to restore liked recipes: {}", e);
        }
        tracing::info!("AppState initialized with {} liked recipes", likes.count());

        Self {
            settings,
            search: None,
            current_page: 1,
            recipe: None,
            list: ShoppingList::new(),
            likes,
            recipes,
            searches,
            search_generation: Generation::default(),
            recipe_generation: Generation::default(),
        }
    }

    pub fn search_results(&self) -> Option<&SearchResultSet> {
        self.search.as_ref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn recipe(&self) -> Option<&RecipeModel> {
        self.recipe.as_ref()
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn likes(&self) -> &FavoritesStore {
        &self.likes
    }

    /// Whether the selected recipe is liked
    pub fn is_recipe_liked(&self) -> bool {
        self.recipe
            .as_ref()
            .is_some_and(|recipe| self.likes.is_liked(recipe.id()))
    }

    /// Start a search; any search still in flight becomes stale
    pub fn begin_search(&mut self, query: &str) -> FetchTicket {
        self.search_generation.begin(query)
    }

    /// Apply a finished search if it is still the latest one
    ///
    /// Results and errors of stale searches are both dropped.
    pub fn complete_search(
        &mut self,
        ticket: FetchTicket,
        result: Result<Value, FetchError>,
    ) -> Result<Applied, AppError> {
        if !self.search_generation.is_current(&ticket) {
            tracing::warn!("Discarding stale search for '{}'", ticket.target);
            return Ok(Applied::Stale);
        }

        let results = SearchResultSet::from_payload(ticket.target, &result?)?;
        tracing::info!("Search '{}' found {} recipes", results.query(), results.len());
        self.search = Some(results);
        self.current_page = 1;
        Ok(Applied::Current)
    }

    /// Start loading a recipe; any recipe still in flight becomes stale
    pub fn begin_recipe(&mut self, id: &str) -> FetchTicket {
        self.recipe_generation.begin(id)
    }

    /// Apply a fetched recipe if it is still the selected one
    pub fn complete_recipe(
        &mut self,
        ticket: FetchTicket,
        result: Result<Value, FetchError>,
    ) -> Result<Applied, AppError> {
        if !self.recipe_generation.is_current(&ticket) {
            tracing::warn!("Discarding stale recipe {}", ticket.target);
            return Ok(Applied::Stale);
        }

        let recipe = RecipeModel::from_payload_with(&result?, &self.settings)?;
        tracing::info!("Selected recipe {} ({})", recipe.id(), recipe.title());
        self.recipe = Some(recipe);
        Ok(Applied::Current)
    }

    /// Run a search through the search repository
    pub async fn search(&mut self, query: &str) -> Result<Applied, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let ticket = self.begin_search(query);
        let searches = Arc::clone(&self.searches);
        let result = searches.fetch_by_query(query).await;
        self.complete_search(ticket, result)
    }

    /// Load and select a recipe through the recipe repository
    pub async fn select_recipe(&mut self, id: &str) -> Result<Applied, AppError> {
        let ticket = self.begin_recipe(id);
        let recipes = Arc::clone(&self.recipes);
        let result = recipes.fetch_by_id(id).await;
        self.complete_recipe(ticket, result)
    }

    /// Apply a synchronous user action
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, AppError> {
        tracing::debug!("Dispatching {:?}", action);

        match action {
            Action::IncreaseServings => self.update_servings(ServingsDirection::Increase),
            Action::DecreaseServings => self.update_servings(ServingsDirection::Decrease),
            Action::AddRecipeToList => {
                let recipe = self.recipe.as_ref().ok_or(AppError::NoActiveRecipe)?;
                let items = self.list.add_ingredients(&recipe.scaled_ingredients());
                Ok(Outcome::ItemsAdded(items))
            }
            Action::DeleteListItem(id) => Ok(Outcome::ItemDeleted(self.list.delete_item(&id))),
            Action::UpdateListCount { id, quantity } => {
                let updated = self.list.update_count(&id, quantity);
                Ok(Outcome::CountUpdated { id, updated })
            }
            Action::ClearList => {
                self.list.clear();
                Ok(Outcome::ListCleared)
            }
            Action::ToggleLike => self.toggle_like(),
            Action::GoToPage(page) => {
                let search = self.search.as_ref().ok_or(AppError::NoActiveSearch)?;
                let per_page = self.settings.results_per_page;
                let hits = search.page(page, per_page).to_vec();
                let info = search.page_info(page, per_page);
                if !hits.is_empty() {
                    self.current_page = page;
                }
                Ok(Outcome::Page { hits, info })
            }
        }
    }

    fn update_servings(&mut self, direction: ServingsDirection) -> Result<Outcome, AppError> {
        let recipe = self.recipe.as_mut().ok_or(AppError::NoActiveRecipe)?;
        let changed = recipe.update_servings(direction);
        Ok(Outcome::Servings {
            changed,
            servings: recipe.current_servings(),
            ingredients: recipe.scaled_ingredients(),
        })
    }

    fn toggle_like(&mut self) -> Result<Outcome, AppError> {
        let recipe = self.recipe.as_ref().ok_or(AppError::NoActiveRecipe)?;

        let (liked, like) = if self.likes.is_liked(recipe.id()) {
            let removed = self
                .likes
                .delete_like(recipe.id())
                .unwrap_or_else(|| recipe.liked_recipe());
            (false, removed)
        } else {
            (true, self.likes.insert(recipe.liked_recipe()))
        };

        Ok(Outcome::LikeToggled {
            liked,
            recipe: like,
            count: self.likes.count(),
        })
    }
}
