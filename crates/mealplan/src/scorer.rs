use std::collections::HashSet;

use mealweek_shared::recipe::{Category, Recipe};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use time::OffsetDateTime;

const SECONDS_PER_DAY: i64 = 86_400;

/// Tunable heuristics behind the recipe score.
///
/// None of these values is load bearing for correctness; the defaults keep
/// behaviour compatible with existing plans.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub base: i64,
    /// Subtracted when the recipe was already chosen earlier in the run.
    pub repeat_penalty: i64,
    /// Subtracted when the recipe's category was already chosen in the run.
    pub category_penalty: i64,
    pub never_cooked_bonus: i64,
    /// One point per day since last cooked, saturating here.
    pub freshness_cap_days: i64,
    /// Fraction of the ranked pool the final pick is drawn from.
    pub shortlist_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 100,
            repeat_penalty: 95,
            category_penalty: 80,
            never_cooked_bonus: 20,
            freshness_cap_days: 30,
            shortlist_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub recipe: &'a Recipe,
    pub score: i64,
}

/// Scores recipes for a single day slot and draws a pick from the best of them.
#[derive(Debug, Clone)]
pub struct RecipeScorer {
    now: OffsetDateTime,
    weights: ScoringWeights,
}

impl RecipeScorer {
    pub fn new(now: OffsetDateTime) -> Self {
        Self::with_weights(now, ScoringWeights::default())
    }

    pub fn with_weights(now: OffsetDateTime, weights: ScoringWeights) -> Self {
        Self { now, weights }
    }

    /// Score is always at least 1 so every recipe stays selectable.
    pub fn score(
        &self,
        recipe: &Recipe,
        excluded_ids: &HashSet<u64>,
        excluded_categories: &HashSet<Category>,
    ) -> i64 {
        let mut score = self.weights.base;

        if excluded_ids.contains(&recipe.id) {
            score -= self.weights.repeat_penalty;
        }

        if excluded_categories.contains(&recipe.category) {
            score -= self.weights.category_penalty;
        }

        score += self.freshness(recipe);

        score.max(1)
    }

    pub fn freshness(&self, recipe: &Recipe) -> i64 {
        let Some(last_cooked) = recipe.last_cooked else {
            return self.weights.never_cooked_bonus;
        };

        let elapsed_days = (self.now - last_cooked)
            .whole_seconds()
            .div_euclid(SECONDS_PER_DAY);

        elapsed_days.min(self.weights.freshness_cap_days)
    }

    /// Every recipe with its score, best first. Equal scores keep pool order.
    pub fn rank<'a>(
        &self,
        recipes: &'a [Recipe],
        excluded_ids: &HashSet<u64>,
        excluded_categories: &HashSet<Category>,
    ) -> Vec<ScoredCandidate<'a>> {
        let mut candidates = recipes
            .iter()
            .map(|recipe| ScoredCandidate {
                recipe,
                score: self.score(recipe, excluded_ids, excluded_categories),
            })
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        candidates
    }

    pub fn shortlist_len(&self, candidates: usize) -> usize {
        let len = (candidates as f64 * self.weights.shortlist_ratio).floor() as usize;

        len.clamp(1, candidates.max(1))
    }

    pub fn pick<'a>(
        &self,
        recipes: &'a [Recipe],
        excluded_ids: &HashSet<u64>,
        excluded_categories: &HashSet<Category>,
    ) -> Option<&'a Recipe> {
        self.pick_with(recipes, excluded_ids, excluded_categories, &mut rand::rng())
    }

    pub fn pick_with<'a, R: Rng + ?Sized>(
        &self,
        recipes: &'a [Recipe],
        excluded_ids: &HashSet<u64>,
        excluded_categories: &HashSet<Category>,
        rng: &mut R,
    ) -> Option<&'a Recipe> {
        let ranked = self.rank(recipes, excluded_ids, excluded_categories);
        let len = self.shortlist_len(ranked.len());

        sample(&ranked[..len.min(ranked.len())], rng)
    }
}

/// Uniform draw from an already ranked shortlist.
pub fn sample<'a, R: Rng + ?Sized>(
    shortlist: &[ScoredCandidate<'a>],
    rng: &mut R,
) -> Option<&'a Recipe> {
    shortlist.choose(rng).map(|c| c.recipe)
}
