use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    pub cuisine: String,
    pub time_mins: u32,
    pub difficulty: Difficulty,
    pub rating: f32,
    pub ingredients: Vec<String>,
}

/// How to order filtered results. Recommended currently favors rating, kept
/// separate so the heuristic can evolve without touching callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Recommended,
    TimeAscending,
    RatingDescending,
}

/// Browse criteria. `search` matches the title or any ingredient,
/// case-insensitively. An empty difficulty list means no restriction.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub max_time_mins: Option<u32>,
    pub difficulties: Vec<Difficulty>,
}

pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The built-in demo dataset.
    pub fn sample() -> Self {
        fn recipe(
            id: u32,
            title: &str,
            cuisine: &str,
            time_mins: u32,
            difficulty: Difficulty,
            rating: f32,
            ingredients: &[&str],
        ) -> Recipe {
            Recipe {
                id,
                title: title.to_string(),
                cuisine: cuisine.to_string(),
                time_mins,
                difficulty,
                rating,
                ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            }
        }

        Self::new(vec![
            recipe(
                1,
                "Spicy Chickpea Curry",
                "Indian",
                30,
                Difficulty::Easy,
                4.5,
                &["chickpeas", "tomato", "onion", "garlic", "spices"],
            ),
            recipe(
                2,
                "Creamy Mushroom Pasta",
                "Italian",
                25,
                Difficulty::Easy,
                4.2,
                &["pasta", "mushroom", "cream", "parmesan"],
            ),
            recipe(
                3,
                "Korean Bibimbap",
                "Korean",
                45,
                Difficulty::Medium,
                4.7,
                &["rice", "spinach", "carrot", "egg", "gochujang"],
            ),
            recipe(
                4,
                "Avocado Toast Deluxe",
                "American",
                10,
                Difficulty::Easy,
                4.0,
                &["bread", "avocado", "lemon", "chili"],
            ),
            recipe(
                5,
                "Shakshuka",
                "Middle Eastern",
                35,
                Difficulty::Medium,
                4.6,
                &["tomato", "egg", "pepper", "onion", "cumin"],
            ),
        ])
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Distinct cuisines, sorted.
    pub fn cuisines(&self) -> Vec<String> {
        let mut cuisines: Vec<String> = self.recipes.iter().map(|r| r.cuisine.clone()).collect();
        cuisines.sort();
        cuisines.dedup();
        cuisines
    }

    pub fn filter(&self, filter: &RecipeFilter, order: SortOrder) -> Vec<&Recipe> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut matches: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|r| needle.as_deref().map_or(true, |n| matches_search(r, n)))
            .filter(|r| {
                filter
                    .cuisine
                    .as_deref()
                    .map_or(true, |c| r.cuisine.eq_ignore_ascii_case(c))
            })
            .filter(|r| filter.max_time_mins.map_or(true, |max| r.time_mins <= max))
            .filter(|r| filter.difficulties.is_empty() || filter.difficulties.contains(&r.difficulty))
            .collect();

        match order {
            SortOrder::TimeAscending => matches.sort_by_key(|r| r.time_mins),
            SortOrder::Recommended | SortOrder::RatingDescending => {
                matches.sort_by(|a, b| b.rating.total_cmp(&a.rating))
            }
        }
        matches
    }
}

fn matches_search(recipe: &Recipe, needle_lower: &str) -> bool {
    recipe.title.to_lowercase().contains(needle_lower)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(needle_lower))
}

/// A recipe's ingredients split by presence in the pantry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryCheck {
    pub available: Vec<String>,
    pub missing: Vec<String>,
}

impl PantryCheck {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Case-insensitive pantry comparison; blank pantry entries are ignored.
pub fn pantry_check(recipe: &Recipe, pantry: &[String]) -> PantryCheck {
    let pantry: Vec<String> = pantry
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    let mut check = PantryCheck {
        available: Vec::new(),
        missing: Vec::new(),
    };
    for ingredient in &recipe.ingredients {
        if pantry.iter().any(|p| *p == ingredient.to_lowercase()) {
            check.available.push(ingredient.clone());
        } else {
            check.missing.push(ingredient.clone());
        }
    }
    check
}

/// Side-by-side metric rows for two recipes.
pub fn compare(a: &Recipe, b: &Recipe) -> Vec<(String, String, String)> {
    vec![
        (
            "cook time (mins)".to_string(),
            a.time_mins.to_string(),
            b.time_mins.to_string(),
        ),
        (
            "difficulty".to_string(),
            a.difficulty.to_string(),
            b.difficulty.to_string(),
        ),
        (
            "rating".to_string(),
            format!("{:.1}", a.rating),
            format!("{:.1}", b.rating),
        ),
        (
            "ingredients".to_string(),
            a.ingredients.len().to_string(),
            b.ingredients.len().to_string(),
        ),
    ]
}
