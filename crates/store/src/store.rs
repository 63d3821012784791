use std::cell::OnceCell;

use chrono::NaiveDate;
use mealplanner_mealplan::{Generate, MealChoice, PoolStrategy};
use mealplanner_shared::mealplan::MealPlanDay;
use mealplanner_shared::pantry::{PantryInput, PantryItem};
use mealplanner_shared::recipe::{DietaryRestriction, MealType, Recipe, RecipeInput};
use mealplanner_shared::{AppState, conflict, not_found};
use mealplanner_shopping::{ShoppingListItem, generate_shopping_list};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::repository::StateRepository;
use crate::seed::initial_state;

/// Owns the application state. Every mutation is written through the
/// repository before it returns.
pub struct Store<R: StateRepository> {
    repo: R,
    state: AppState,
    initial: AppState,
    revision: u64,
    shopping: OnceCell<Vec<ShoppingListItem>>,
}

impl<R: StateRepository> Store<R> {
    pub fn open(repo: R) -> mealplanner_shared::Result<Self> {
        Self::open_with(repo, initial_state())
    }

    /// Loads the persisted document over `initial`. Each top-level key present
    /// in the document replaces the initial one wholesale. A key that cannot
    /// be read keeps its initial value; the document is then copied to the
    /// repository backup before anything is written over it.
    pub fn open_with(mut repo: R, initial: AppState) -> mealplanner_shared::Result<Self> {
        let state = match repo.load()? {
            Some(document) => {
                let (state, damaged) = match merge(&initial, &document) {
                    Ok(merged) => merged,
                    Err(err) => {
                        tracing::error!(error = %err, "stored state is unreadable, using defaults");
                        (initial.clone(), vec!["document".to_owned()])
                    }
                };

                if !damaged.is_empty() {
                    repo.backup(&document)?;
                    tracing::warn!(keys = ?damaged, "original document kept as a backup");
                }

                tracing::info!(
                    recipes = state.recipes.len(),
                    pantry = state.pantry.len(),
                    plan_days = state.meal_plan.len(),
                    "state loaded"
                );
                state
            }
            None => {
                tracing::info!("no stored state, starting fresh");
                initial.clone()
            }
        };

        let mut store = Self {
            repo,
            state,
            initial,
            revision: 0,
            shopping: OnceCell::new(),
        };
        store.persist()?;

        Ok(store)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.state.recipe(id)
    }

    pub fn add_recipe(&mut self, recipe: Recipe) -> mealplanner_shared::Result<()> {
        if self.state.recipe(&recipe.id).is_some() {
            conflict!("recipe {} already exists", recipe.id);
        }

        tracing::info!(id = %recipe.id, title = %recipe.title, "recipe added");
        self.state.recipes.push(recipe);
        self.commit()
    }

    pub fn create_recipe(&mut self, input: RecipeInput) -> mealplanner_shared::Result<String> {
        let id = Uuid::new_v4().to_string();
        let recipe = input.into_recipe(&id)?;
        self.add_recipe(recipe)?;

        Ok(id)
    }

    pub fn update_recipe(&mut self, recipe: Recipe) -> mealplanner_shared::Result<()> {
        let Some(existing) = self.state.recipes.iter_mut().find(|r| r.id == recipe.id) else {
            not_found!("recipe {}", recipe.id);
        };

        *existing = recipe;
        self.commit()
    }

    /// Plan slots pointing at the recipe are left as they are.
    pub fn delete_recipe(&mut self, id: &str) -> mealplanner_shared::Result<bool> {
        let before = self.state.recipes.len();
        self.state.recipes.retain(|r| r.id != id);

        if self.state.recipes.len() == before {
            return Ok(false);
        }

        tracing::info!(id, "recipe deleted");
        self.commit()?;

        Ok(true)
    }

    pub fn upsert_pantry_item(&mut self, item: PantryItem) -> mealplanner_shared::Result<()> {
        match self.state.pantry.iter_mut().find(|p| p.id == item.id) {
            Some(existing) => *existing = item,
            None => self.state.pantry.push(item),
        }

        self.commit()
    }

    pub fn add_pantry_item(&mut self, input: PantryInput) -> mealplanner_shared::Result<String> {
        let id = Uuid::new_v4().to_string();
        let item = input.into_item(&id)?;
        self.upsert_pantry_item(item)?;

        Ok(id)
    }

    pub fn remove_pantry_item(&mut self, id: &str) -> mealplanner_shared::Result<bool> {
        let before = self.state.pantry.len();
        self.state.pantry.retain(|p| p.id != id);

        if self.state.pantry.len() == before {
            return Ok(false);
        }

        self.commit()?;
        Ok(true)
    }

    pub fn update_meal_plan(&mut self, plan: Vec<MealPlanDay>) -> mealplanner_shared::Result<()> {
        self.state.meal_plan = plan;
        self.commit()
    }

    pub fn set_meal(
        &mut self,
        date: NaiveDate,
        meal_type: MealType,
        choice: MealChoice,
    ) -> mealplanner_shared::Result<()> {
        let plan = mealplanner_mealplan::set_meal(
            &self.state.meal_plan,
            date,
            meal_type,
            choice,
            &self.state.preferences.users,
        )?;

        self.update_meal_plan(plan)
    }

    /// Replaces the plan with a fresh week for the current household.
    pub fn generate_plan(
        &mut self,
        start: Option<NaiveDate>,
        strategy: PoolStrategy,
        seed: Option<u64>,
    ) -> mealplanner_shared::Result<&[MealPlanDay]> {
        let input = Generate {
            start,
            attendees: self.state.preferences.users.to_vec(),
            dietary_restrictions: self.state.preferences.dietary_restrictions.to_vec(),
            strategy,
            seed,
        };

        let plan = input.run(&self.state.recipes);
        self.update_meal_plan(plan)?;

        Ok(&self.state.meal_plan)
    }

    /// Recomputed only after a mutation.
    pub fn shopping_list(&self) -> &[ShoppingListItem] {
        self.shopping.get_or_init(|| {
            tracing::debug!(revision = self.revision, "computing shopping list");
            generate_shopping_list(
                &self.state.meal_plan,
                &self.state.recipes,
                &self.state.pantry,
            )
        })
    }

    pub fn set_users(&mut self, users: Vec<String>) -> mealplanner_shared::Result<()> {
        self.state.preferences.users = users;
        self.commit()
    }

    pub fn set_dietary_restrictions(
        &mut self,
        mut restrictions: Vec<DietaryRestriction>,
    ) -> mealplanner_shared::Result<()> {
        restrictions.sort();
        restrictions.dedup();

        self.state.preferences.dietary_restrictions = restrictions;
        self.commit()
    }

    /// Back to the initial state. Storage is cleared, not rewritten.
    pub fn reset(&mut self) -> mealplanner_shared::Result<()> {
        self.state = self.initial.clone();
        self.bump();
        self.repo.clear()?;

        tracing::info!("state reset");
        Ok(())
    }

    fn commit(&mut self) -> mealplanner_shared::Result<()> {
        self.bump();
        self.persist()
    }

    fn bump(&mut self) {
        self.revision += 1;
        self.shopping = OnceCell::new();
    }

    fn persist(&mut self) -> mealplanner_shared::Result<()> {
        let document = serde_json::to_string_pretty(&self.state)?;
        self.repo.save(&document)?;

        tracing::debug!(revision = self.revision, "state persisted");
        Ok(())
    }
}

/// Returns the merged state and the keys that fell back to their initial
/// value. Unknown keys are ignored.
fn merge(
    initial: &AppState,
    document: &str,
) -> mealplanner_shared::Result<(AppState, Vec<String>)> {
    let stored: Value = serde_json::from_str(document)?;
    let Value::Object(stored) = stored else {
        return Err(anyhow::anyhow!("stored state is not a JSON object").into());
    };

    let mut state = initial.clone();
    let mut damaged = vec![];

    for (key, value) in stored {
        match key.as_str() {
            "recipes" => field(&mut state.recipes, &key, value, &mut damaged),
            "pantry" => field(&mut state.pantry, &key, value, &mut damaged),
            "mealPlan" => field(&mut state.meal_plan, &key, value, &mut damaged),
            "preferences" => field(&mut state.preferences, &key, value, &mut damaged),
            _ => tracing::debug!(key = %key, "unknown key in stored state ignored"),
        }
    }

    Ok((state, damaged))
}

fn field<T: DeserializeOwned>(
    slot: &mut T,
    key: &str,
    value: Value,
    damaged: &mut Vec<String>,
) {
    match serde_json::from_value(value) {
        Ok(parsed) => *slot = parsed,
        Err(err) => {
            tracing::error!(key, error = %err, "stored key is unreadable, using its default");
            damaged.push(key.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;

    #[test]
    fn test_merge_keeps_missing_keys() {
        let initial = initial_state();
        let (state, damaged) = merge(&initial, r#"{"pantry": [], "extra": 1}"#).unwrap();

        assert_eq!(state.recipes, initial.recipes);
        assert_eq!(state.preferences, initial.preferences);
        assert!(damaged.is_empty());
    }

    #[test]
    fn test_merge_rejects_non_object() {
        assert!(merge(&initial_state(), "[1, 2]").is_err());
        assert!(merge(&initial_state(), "not json").is_err());
    }

    #[test]
    fn test_merge_isolates_unreadable_keys() {
        let initial = initial_state();
        let (state, damaged) = merge(
            &initial,
            r#"{"recipes": [], "pantry": [{"id": 1}], "mealPlan": "soon"}"#,
        )
        .unwrap();

        assert!(state.recipes.is_empty());
        assert_eq!(state.pantry, initial.pantry);
        assert_eq!(state.meal_plan, initial.meal_plan);
        assert_eq!(damaged, vec!["mealPlan", "pantry"]);
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let mut store = Store::open(MemoryRepository::default()).unwrap();
        assert_eq!(store.revision(), 0);

        store.set_users(vec!["Sam".to_owned()]).unwrap();
        store.set_dietary_restrictions(vec![]).unwrap();
        assert_eq!(store.revision(), 2);

        assert!(!store.delete_recipe("missing").unwrap());
        assert_eq!(store.revision(), 2);
    }
}
