use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::OffsetDateTime;
use validator::Validate;

/// Closed set of recipe categories.
///
/// Stored data written with the Swedish category names is still accepted
/// through the aliases.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Pasta,
    #[strum(to_string = "Meat", serialize = "Kött")]
    #[serde(alias = "Kött")]
    Meat,
    #[strum(to_string = "Fish", serialize = "Fisk")]
    #[serde(alias = "Fisk")]
    Fish,
    #[strum(to_string = "Vegetarian", serialize = "Vegetariskt")]
    #[serde(alias = "Vegetariskt")]
    Vegetarian,
    #[strum(to_string = "Chicken", serialize = "Kyckling")]
    #[serde(alias = "Kyckling")]
    Chicken,
    #[default]
    #[strum(to_string = "Other", serialize = "Annat")]
    #[serde(alias = "Annat")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub has_recipe_content: bool,
    pub category: Category,
    /// `None` means the recipe was never cooked.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_cooked: Option<OffsetDateTime>,
}

impl Recipe {
    pub fn new(id: u64, name: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            source: None,
            has_recipe_content: false,
            category,
            last_cooked: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn cooked_at(mut self, at: OffsetDateTime) -> Self {
        self.last_cooked = Some(at);
        self
    }

    pub fn is_never_cooked(&self) -> bool {
        self.last_cooked.is_none()
    }

    /// Case-insensitive match on name or source.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .source
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
    }
}

/// Stamps `last_cooked = at` on every recipe whose id is in `ids`.
///
/// Returns how many recipes were touched.
pub fn mark_cooked(recipes: &mut [Recipe], ids: &[u64], at: OffsetDateTime) -> usize {
    let mut touched = 0;

    for recipe in recipes.iter_mut().filter(|r| ids.contains(&r.id)) {
        recipe.last_cooked = Some(at);
        touched += 1;
    }

    touched
}

/// User supplied fields for creating or editing a recipe.
#[derive(Validate, Debug, Clone)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub category: Category,
    #[validate(length(min = 1, max = 200))]
    pub source: Option<String>,
}

impl RecipeInput {
    pub fn new(name: impl AsRef<str>, category: Category, source: Option<&str>) -> Self {
        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Self {
            name: name.as_ref().trim().to_owned(),
            category,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use time::macros::datetime;

    #[test]
    fn test_category_parses_legacy_names() {
        assert_eq!(Category::from_str("Kött").unwrap(), Category::Meat);
        assert_eq!(Category::from_str("fish").unwrap(), Category::Fish);
        assert_eq!(Category::Meat.to_string(), "Meat");
        assert!(Category::from_str("Soup").is_err());
    }

    #[test]
    fn test_recipe_reads_legacy_json() {
        let json = r#"{"id":10,"name":"Lax med sås i ugn","source":null,"hasRecipeContent":false,"category":"Fisk","lastCooked":"2025-01-03T17:00:00.000Z"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.category, Category::Fish);
        assert_eq!(recipe.last_cooked, Some(datetime!(2025-01-03 17:00:00 UTC)));
    }

    #[test]
    fn test_recipe_never_cooked_round_trip() {
        let recipe = Recipe::new(1, "Tacos", Category::Other);
        let json = serde_json::to_string(&recipe).unwrap();

        assert!(json.contains("\"lastCooked\":null"));
        assert_eq!(serde_json::from_str::<Recipe>(&json).unwrap(), recipe);
    }

    #[test]
    fn test_matches_name_or_source() {
        let recipe =
            Recipe::new(3, "Grönkålspasta", Category::Pasta).with_source("Portionen under tian");

        assert!(recipe.matches("pasta"));
        assert!(recipe.matches("PORTIONEN"));
        assert!(!recipe.matches("ica"));
    }

    #[test]
    fn test_mark_cooked_only_touches_listed_ids() {
        let at = datetime!(2025-02-10 18:00:00 UTC);
        let mut recipes = vec![
            Recipe::new(1, "a", Category::Pasta),
            Recipe::new(2, "b", Category::Fish),
        ];

        assert_eq!(mark_cooked(&mut recipes, &[2, 7], at), 1);
        assert_eq!(recipes[0].last_cooked, None);
        assert_eq!(recipes[1].last_cooked, Some(at));
    }

    #[test]
    fn test_recipe_input_trims_and_validates() {
        let input = RecipeInput::new("  Lasagne ", Category::Pasta, Some("   "));
        assert_eq!(input.name, "Lasagne");
        assert_eq!(input.source, None);
        assert!(input.validate().is_ok());

        let blank = RecipeInput::new("   ", Category::Pasta, None);
        assert!(blank.validate().is_err());
    }
}
