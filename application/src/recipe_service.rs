use std::collections::HashSet;

use domain::recipe::{Recipe, RecipeCatalog, RecipeFilter, SortOrder};
use infrastructure::favorites_store::FavoritesStore;
use shared::types::Result;

/// The recipe catalog plus the user's persisted favorites.
pub struct RecipeExplorer {
    catalog: RecipeCatalog,
    favorites: HashSet<u32>,
    store: FavoritesStore,
}

impl RecipeExplorer {
    pub fn new(catalog: RecipeCatalog, store: FavoritesStore) -> Result<Self> {
        let favorites = store.load()?;
        Ok(Self {
            catalog,
            favorites,
            store,
        })
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    pub fn browse(&self, filter: &RecipeFilter, order: SortOrder) -> Vec<&Recipe> {
        self.catalog.filter(filter, order)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Flip a recipe's favorite flag and persist the set; returns the new state.
    pub fn toggle_favorite(&mut self, id: u32) -> Result<bool> {
        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        };
        self.store.save(&self.favorites)?;
        Ok(now_favorite)
    }

    /// Favorite recipes, ordered by title.
    pub fn favorites(&self) -> Vec<&Recipe> {
        let mut favorites: Vec<&Recipe> = self
            .catalog
            .recipes()
            .iter()
            .filter(|r| self.favorites.contains(&r.id))
            .collect();
        favorites.sort_by(|a, b| a.title.cmp(&b.title));
        favorites
    }
}
