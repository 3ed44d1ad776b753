use std::path::{Path, PathBuf};

use mealweek_calendar::{CalendarExporter, CalendarSettings};
use mealweek_mealplan::{RecipeScorer, ScoringWeights, WeekScheduler};
use mealweek_shared::mealplan::{DayIndex, WeekAssignment, WeekId};
use mealweek_shared::recipe::{Category, Recipe, RecipeInput};
use mealweek_shared::{Error, Result};
use mealweek_store::{
    ActiveDaysStore, Authenticator, KeyValue, PlanStore, RecipeStore, SessionGate,
};
use rand::Rng;
use time::{Duration, OffsetDateTime};
use validator::Validate;

/// What an export wrote and which recipes it stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub week: WeekId,
    pub path: PathBuf,
    pub events: usize,
    pub cooked: Vec<u64>,
}

/// Every user facing workflow, run against one key-value store at one instant.
pub struct Planner<K> {
    kv: K,
    now: OffsetDateTime,
    weights: ScoringWeights,
    calendar: CalendarSettings,
    session_ttl: Duration,
    authenticator: Option<Box<dyn Authenticator>>,
}

impl<K: KeyValue> Planner<K> {
    pub fn new(kv: K, now: OffsetDateTime) -> Self {
        Self {
            kv,
            now,
            weights: ScoringWeights::default(),
            calendar: CalendarSettings::default(),
            session_ttl: Duration::days(60),
            authenticator: None,
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarSettings) -> Self {
        self.calendar = calendar;
        self
    }

    /// Turns the password gate on.
    pub fn with_authenticator(
        mut self,
        authenticator: impl Authenticator + 'static,
        ttl: Duration,
    ) -> Self {
        self.authenticator = Some(Box::new(authenticator));
        self.session_ttl = ttl;
        self
    }

    pub fn now(&self) -> OffsetDateTime {
        self.now
    }

    pub fn current_week(&self) -> WeekId {
        WeekId::containing(self.now.date())
    }

    pub fn is_gated(&self) -> bool {
        self.authenticator.is_some()
    }

    #[tracing::instrument(skip_all)]
    pub fn login(&self, password: &str) -> Result<OffsetDateTime> {
        let Some(authenticator) = &self.authenticator else {
            mealweek_shared::bail!("no password configured, login is not required");
        };

        if !authenticator.verify(password)? {
            tracing::warn!("wrong password");
            return Err(Error::Forbidden);
        }

        SessionGate::new(&self.kv).grant(self.now, self.session_ttl)
    }

    pub fn logout(&self) -> Result<()> {
        SessionGate::new(&self.kv).revoke()
    }

    pub fn session_expiry(&self) -> Result<Option<OffsetDateTime>> {
        SessionGate::new(&self.kv).expires_at()
    }

    fn authorize(&self) -> Result<()> {
        if self.authenticator.is_none() || SessionGate::new(&self.kv).is_valid(self.now)? {
            return Ok(());
        }

        Err(Error::Forbidden)
    }

    pub fn recipes(&self) -> Result<Vec<Recipe>> {
        self.authorize()?;

        RecipeStore::new(&self.kv).load()
    }

    /// Case-insensitive match on name or source, optionally limited to one category.
    pub fn search(&self, term: Option<&str>, category: Option<Category>) -> Result<Vec<Recipe>> {
        let term = term.map(str::trim).unwrap_or_default();

        Ok(self
            .recipes()?
            .into_iter()
            .filter(|r| term.is_empty() || r.matches(term))
            .filter(|r| category.is_none_or(|c| r.category == c))
            .collect())
    }

    pub fn recipe(&self, id: u64) -> Result<Recipe> {
        self.recipes()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("recipe {id}")))
    }

    #[tracing::instrument(skip(self))]
    pub fn add_recipe(&self, input: RecipeInput) -> Result<Recipe> {
        input.validate()?;

        let store = RecipeStore::new(&self.kv);
        let mut recipes = self.recipes()?;
        let id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let recipe = Recipe {
            id,
            name: input.name,
            source: input.source,
            has_recipe_content: false,
            category: input.category,
            last_cooked: None,
        };
        recipes.push(recipe.clone());
        store.save(&recipes)?;

        tracing::info!(id, "recipe added");

        Ok(recipe)
    }

    /// Replaces name, category and source; cook history is kept.
    #[tracing::instrument(skip(self))]
    pub fn edit_recipe(&self, id: u64, input: RecipeInput) -> Result<Recipe> {
        input.validate()?;

        self.update_recipe(id, |recipe| {
            recipe.name = input.name;
            recipe.category = input.category;
            recipe.source = input.source;
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn reset_cooked(&self, id: u64) -> Result<Recipe> {
        self.update_recipe(id, |recipe| recipe.last_cooked = None)
    }

    /// Planned days that point at the removed recipe are left as they are
    /// and skipped on export.
    #[tracing::instrument(skip(self))]
    pub fn remove_recipe(&self, id: u64) -> Result<Recipe> {
        let mut recipes = self.recipes()?;
        let idx = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;

        let removed = recipes.remove(idx);
        RecipeStore::new(&self.kv).save(&recipes)?;

        Ok(removed)
    }

    fn update_recipe(&self, id: u64, change: impl FnOnce(&mut Recipe)) -> Result<Recipe> {
        let mut recipes = self.recipes()?;
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;

        change(recipe);
        let updated = recipe.clone();
        RecipeStore::new(&self.kv).save(&recipes)?;

        Ok(updated)
    }

    pub fn active_days(&self) -> Result<Vec<DayIndex>> {
        self.authorize()?;

        ActiveDaysStore::new(&self.kv).load()
    }

    pub fn set_active_days(&self, days: &[DayIndex]) -> Result<Vec<DayIndex>> {
        self.authorize()?;

        ActiveDaysStore::new(&self.kv).save(days)
    }

    pub fn toggle_day(&self, day: DayIndex) -> Result<Vec<DayIndex>> {
        self.authorize()?;

        ActiveDaysStore::new(&self.kv).toggle(day)
    }

    /// The stored assignment, or an empty one when the week was never planned.
    pub fn week(&self, week: WeekId) -> Result<WeekAssignment> {
        self.authorize()?;

        Ok(PlanStore::new(&self.kv)
            .load()?
            .into_iter()
            .find(|p| p.week == week)
            .unwrap_or_else(|| WeekAssignment::new(week)))
    }

    pub fn randomize_week(
        &self,
        week: WeekId,
        days: Option<&[DayIndex]>,
    ) -> Result<WeekAssignment> {
        self.randomize_week_with(week, days, &mut rand::rng())
    }

    /// Schedules `days`, or the active days when none are given, and merges
    /// the result into the stored week.
    #[tracing::instrument(skip(self, rng), fields(week = %week))]
    pub fn randomize_week_with<R: Rng + ?Sized>(
        &self,
        week: WeekId,
        days: Option<&[DayIndex]>,
        rng: &mut R,
    ) -> Result<WeekAssignment> {
        let recipes = self.recipes()?;
        let days = match days {
            Some(days) => days.to_vec(),
            None => self.active_days()?,
        };

        let slots = self.scheduler().schedule_week_with(&days, &recipes, rng);

        self.update_week(week, |assignment| assignment.apply(slots))
    }

    pub fn reroll_day(&self, week: WeekId, day: DayIndex) -> Result<Option<u64>> {
        self.reroll_day_with(week, day, &mut rand::rng())
    }

    /// Picks a new recipe for one day without regard to the rest of the week.
    /// An empty catalog leaves the day as it was.
    #[tracing::instrument(skip(self, rng), fields(week = %week, day = day.value()))]
    pub fn reroll_day_with<R: Rng + ?Sized>(
        &self,
        week: WeekId,
        day: DayIndex,
        rng: &mut R,
    ) -> Result<Option<u64>> {
        let recipes = self.recipes()?;
        let Some(picked) = self.scheduler().schedule_single_day_with(&recipes, rng) else {
            tracing::info!("no recipes to pick from");
            return Ok(self.week(week)?.recipe_for(day));
        };

        let id = picked.id;
        self.update_week(week, |assignment| assignment.set_day(day, Some(id)))?;

        Ok(Some(id))
    }

    /// Sets or clears one day by hand.
    #[tracing::instrument(skip(self), fields(week = %week, day = day.value()))]
    pub fn assign(
        &self,
        week: WeekId,
        day: DayIndex,
        recipe_id: Option<u64>,
    ) -> Result<WeekAssignment> {
        if let Some(id) = recipe_id {
            self.recipe(id)?;
        }

        self.update_week(week, |assignment| assignment.set_day(day, recipe_id))
    }

    fn update_week(
        &self,
        week: WeekId,
        change: impl FnOnce(&mut WeekAssignment),
    ) -> Result<WeekAssignment> {
        self.authorize()?;

        let store = PlanStore::new(&self.kv);
        let mut plans = store.load()?;
        let assignment = WeekAssignment::entry(&mut plans, week);
        change(assignment);
        let updated = assignment.clone();
        store.save(&plans)?;

        Ok(updated)
    }

    fn scheduler(&self) -> WeekScheduler {
        WeekScheduler::new(RecipeScorer::with_weights(self.now, self.weights))
    }

    /// Writes the active, assigned days of `week` as an iCalendar file into
    /// `out_dir`, then stamps the exported recipes as cooked.
    ///
    /// Returns `None` and changes nothing when no day qualifies.
    #[tracing::instrument(skip(self, out_dir), fields(week = %week))]
    pub fn export(&self, week: WeekId, out_dir: &Path) -> Result<Option<ExportReport>> {
        let mut recipes = self.recipes()?;
        let active = self.active_days()?;
        let slots = self.week(week)?.assigned_on(&active);

        let exporter = CalendarExporter::new(self.calendar.clone(), self.now);
        let Some(export) = exporter.export(week, &slots, &recipes)? else {
            tracing::info!("nothing to export");
            return Ok(None);
        };

        std::fs::create_dir_all(out_dir)?;
        let path = out_dir.join(&export.file_name);
        std::fs::write(&path, &export.document)?;

        export.mark_cooked(&mut recipes);
        RecipeStore::new(&self.kv).save(&recipes)?;

        tracing::info!(path = %path.display(), events = export.events, "week exported");

        Ok(Some(ExportReport {
            week,
            path,
            events: export.events,
            cooked: export.cooked_ids().to_vec(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealweek_store::{Argon2Authenticator, MemoryStore, hash_password};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use temp_dir::TempDir;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2025-02-05 12:00:00 UTC);

    fn planner() -> Planner<MemoryStore> {
        Planner::new(MemoryStore::new(), NOW)
    }

    fn week() -> WeekId {
        "2025-W06".parse().unwrap()
    }

    fn day(value: u8) -> DayIndex {
        DayIndex::new(value).unwrap()
    }

    #[test]
    fn test_current_week() {
        assert_eq!(planner().current_week(), week());
    }

    #[test]
    fn test_add_recipe_takes_next_id() {
        let planner = planner();

        let recipe = planner
            .add_recipe(RecipeInput::new("Pytt i panna", Category::Meat, None))
            .unwrap();

        assert_eq!(recipe.id, 22);
        assert_eq!(planner.recipes().unwrap().len(), 22);
    }

    #[test]
    fn test_add_recipe_rejects_blank_name() {
        let result = planner().add_recipe(RecipeInput::new("  ", Category::Meat, None));

        assert!(matches!(result, Err(Error::Validate(_))));
    }

    #[test]
    fn test_edit_keeps_history() {
        let planner = planner();
        planner.assign(week(), day(0), Some(11)).unwrap();
        let dir = TempDir::new().unwrap();
        planner.export(week(), dir.path()).unwrap();

        let edited = planner
            .edit_recipe(11, RecipeInput::new("Fisktacos", Category::Fish, Some("Hemma")))
            .unwrap();

        assert_eq!(edited.name, "Fisktacos");
        assert_eq!(edited.category, Category::Fish);
        assert_eq!(edited.source.as_deref(), Some("Hemma"));
        assert_eq!(edited.last_cooked, Some(NOW));

        assert!(planner.reset_cooked(11).unwrap().is_never_cooked());
    }

    #[test]
    fn test_missing_recipe() {
        let planner = planner();

        assert!(matches!(planner.remove_recipe(99), Err(Error::NotFound(_))));
        assert!(matches!(planner.reset_cooked(99), Err(Error::NotFound(_))));
        assert!(matches!(planner.assign(week(), day(1), Some(99)), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_search() {
        let planner = planner();

        let ica_pasta = planner.search(Some("ica.se"), Some(Category::Pasta)).unwrap();
        assert_eq!(ica_pasta.iter().map(|r| r.id).collect::<Vec<_>>(), vec![17, 19, 20]);

        assert_eq!(planner.search(None, Some(Category::Fish)).unwrap().len(), 3);
        assert_eq!(planner.search(Some("  "), None).unwrap().len(), 21);
    }

    #[test]
    fn test_randomize_only_touches_requested_days() {
        let planner = planner();
        planner.assign(week(), day(6), Some(11)).unwrap();
        let days = [day(0), day(1), day(2)];
        let mut rng = StdRng::seed_from_u64(3);

        let assignment = planner
            .randomize_week_with(week(), Some(days.as_slice()), &mut rng)
            .unwrap();

        assert_eq!(assignment.days.len(), 4);
        assert_eq!(assignment.recipe_for(day(6)), Some(11));
        assert!((0..3).all(|d| assignment.recipe_for(day(d)).is_some()));
        assert_eq!(planner.week(week()).unwrap(), assignment);
    }

    #[test]
    fn test_randomize_defaults_to_active_days() {
        let planner = planner();
        planner.set_active_days(&[day(1), day(3)]).unwrap();

        let assignment = planner.randomize_week(week(), None).unwrap();

        assert_eq!(
            assignment.days.iter().map(|d| d.day).collect::<Vec<_>>(),
            vec![day(1), day(3)]
        );
    }

    #[test]
    fn test_reroll_on_empty_catalog_keeps_day() {
        let planner = planner();
        planner.assign(week(), day(2), Some(5)).unwrap();
        for id in 1..=21 {
            planner.remove_recipe(id).unwrap();
        }

        assert_eq!(planner.reroll_day(week(), day(2)).unwrap(), Some(5));
    }

    #[test]
    fn test_export_with_nothing_assigned_changes_nothing() {
        let planner = planner();
        planner.assign(week(), day(0), None).unwrap();
        let before = planner.recipes().unwrap();

        let dir = TempDir::new().unwrap();

        let report = planner.export(week(), dir.path()).unwrap();

        assert!(report.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(planner.recipes().unwrap(), before);
    }

    #[test]
    fn test_gate_blocks_until_login() {
        let auth = Argon2Authenticator::new(hash_password("Torsgatan5!").unwrap()).unwrap();
        let planner =
            Planner::new(MemoryStore::new(), NOW).with_authenticator(auth, Duration::days(60));

        assert!(planner.is_gated());
        assert_eq!(planner.session_expiry().unwrap(), None);
        assert!(matches!(planner.recipes(), Err(Error::Forbidden)));
        assert!(matches!(planner.login("nope"), Err(Error::Forbidden)));

        let expiry = planner.login("Torsgatan5!").unwrap();
        assert_eq!(expiry, NOW + Duration::days(60));
        assert_eq!(planner.session_expiry().unwrap(), Some(expiry));
        assert_eq!(planner.recipes().unwrap().len(), 21);

        planner.logout().unwrap();
        assert_eq!(planner.session_expiry().unwrap(), None);
        assert!(matches!(planner.week(week()), Err(Error::Forbidden)));
    }

    #[test]
    fn test_login_without_password_configured() {
        assert!(!planner().is_gated());
        assert!(planner().login("anything").is_err());
    }
}
