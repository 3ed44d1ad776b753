use std::collections::HashSet;

use mealweek_shared::mealplan::{DayIndex, DaySlot};
use mealweek_shared::recipe::Recipe;
use rand::Rng;

use crate::RecipeScorer;

/// Fills the active days of one week, steering later days away from recipes
/// and categories already picked earlier in the same run.
#[derive(Debug, Clone)]
pub struct WeekScheduler {
    scorer: RecipeScorer,
}

impl WeekScheduler {
    pub fn new(scorer: RecipeScorer) -> Self {
        Self { scorer }
    }

    pub fn schedule_week(&self, active_days: &[DayIndex], pool: &[Recipe]) -> Vec<DaySlot> {
        self.schedule_week_with(active_days, pool, &mut rand::rng())
    }

    /// Days are processed in the order given, so earlier days get first choice.
    pub fn schedule_week_with<R: Rng + ?Sized>(
        &self,
        active_days: &[DayIndex],
        pool: &[Recipe],
        rng: &mut R,
    ) -> Vec<DaySlot> {
        let mut used_ids = HashSet::new();
        let mut used_categories = HashSet::new();

        let slots = active_days
            .iter()
            .map(|&day| {
                let picked = self
                    .scorer
                    .pick_with(pool, &used_ids, &used_categories, &mut *rng);

                if let Some(recipe) = picked {
                    tracing::debug!(
                        day = day.value(),
                        recipe = recipe.id,
                        category = %recipe.category,
                        "picked recipe"
                    );
                    used_ids.insert(recipe.id);
                    used_categories.insert(recipe.category);
                }

                DaySlot::new(day, picked.map(|r| r.id))
            })
            .collect::<Vec<_>>();

        tracing::info!(
            days = slots.len(),
            assigned = slots.iter().filter(|s| s.is_assigned()).count(),
            pool = pool.len(),
            "week scheduled"
        );

        slots
    }

    /// Isolated pick for one slot; ignores whatever else the week holds.
    pub fn schedule_single_day<'a>(&self, pool: &'a [Recipe]) -> Option<&'a Recipe> {
        self.schedule_single_day_with(pool, &mut rand::rng())
    }

    pub fn schedule_single_day_with<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a [Recipe],
        rng: &mut R,
    ) -> Option<&'a Recipe> {
        self.scorer
            .pick_with(pool, &HashSet::new(), &HashSet::new(), rng)
    }
}
