use mealweek_shared::Result;
use mealweek_shared::recipe::Recipe;

use crate::{KeyValue, catalog, read_json, write_json};

pub const RECIPES_KEY: &str = "recipes_v3";

pub struct RecipeStore<K> {
    kv: K,
}

impl<K: KeyValue> RecipeStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Stored recipes, or the built-in catalog on first use.
    pub fn load(&self) -> Result<Vec<Recipe>> {
        if let Some(recipes) = read_json(&self.kv, RECIPES_KEY)? {
            return Ok(recipes);
        }

        let recipes = catalog();
        self.save(&recipes)?;
        tracing::info!(recipes = recipes.len(), "seeded recipe catalog");

        Ok(recipes)
    }

    pub fn save(&self, recipes: &[Recipe]) -> Result<()> {
        write_json(&self.kv, RECIPES_KEY, recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use mealweek_shared::Error;
    use mealweek_shared::recipe::Category;

    #[test]
    fn test_first_load_seeds_catalog() {
        let kv = MemoryStore::new();
        let store = RecipeStore::new(&kv);

        assert_eq!(store.load().unwrap().len(), 21);
        assert!(kv.get(RECIPES_KEY).unwrap().is_some());
    }

    #[test]
    fn test_saved_recipes_replace_catalog() {
        let kv = MemoryStore::new();
        let store = RecipeStore::new(&kv);
        store
            .save(&[Recipe::new(40, "Pytt i panna", Category::Meat)])
            .unwrap();

        let recipes = store.load().unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Pytt i panna");
    }

    #[test]
    fn test_empty_list_is_not_reseeded() {
        let store = RecipeStore::new(MemoryStore::new());
        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_recipes() {
        let kv = MemoryStore::new();
        kv.set(RECIPES_KEY, "{not json").unwrap();

        assert!(matches!(RecipeStore::new(&kv).load(), Err(Error::Storage(_))));
    }
}
