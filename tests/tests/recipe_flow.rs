use std::fs;

use application::recipe_service::RecipeExplorer;
use domain::recipe::{Difficulty, RecipeCatalog, RecipeFilter, SortOrder};
use infrastructure::favorites_store::FavoritesStore;
use tests::scratch_dir;

#[test]
fn browsing_applies_all_filters_together() {
    let dir = scratch_dir("browse");
    let store = FavoritesStore::new(dir.join("favorites.json"));
    let explorer = RecipeExplorer::new(RecipeCatalog::sample(), store).unwrap();

    let filter = RecipeFilter {
        search: Some("tomato".to_string()),
        max_time_mins: Some(40),
        difficulties: vec![Difficulty::Easy, Difficulty::Medium],
        ..RecipeFilter::default()
    };
    let results = explorer.browse(&filter, SortOrder::RatingDescending);
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Shakshuka", "Spicy Chickpea Curry"]);
}

#[test]
fn favorites_survive_a_reload_from_disk() {
    let dir = scratch_dir("favorites");
    let path = dir.join("favorites.json");

    {
        let store = FavoritesStore::new(path.clone());
        let mut explorer = RecipeExplorer::new(RecipeCatalog::sample(), store).unwrap();
        assert!(explorer.toggle_favorite(3).unwrap());
        assert!(explorer.toggle_favorite(5).unwrap());
        assert!(!explorer.toggle_favorite(5).unwrap());
    }

    let store = FavoritesStore::new(path);
    let explorer = RecipeExplorer::new(RecipeCatalog::sample(), store).unwrap();
    assert!(explorer.is_favorite(3));
    assert!(!explorer.is_favorite(5));
    let favorites = explorer.favorites();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "Korean Bibimbap");

    fs::remove_dir_all(&dir).unwrap();
}
