use chrono::NaiveDate;
use mealplanner_shared::mealplan::{Meal, MealPlanDay, SNACK_PLACEHOLDER};
use mealplanner_shared::recipe::{DietaryRestriction, MealType, Recipe};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const BREAKFAST_KEYWORDS: [&str; 10] = [
    "pancake", "porridge", "oat", "granola", "omelette", "egg", "toast", "smoothie", "muffin",
    "yogurt",
];

/// How recipes are sorted into the breakfast and main pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolStrategy {
    /// Only the explicit meal type classification counts.
    #[default]
    MealTypes,
    /// Classification, then tags, then title keywords.
    Heuristic,
}

#[derive(Clone, Debug, Default)]
pub struct Generate {
    /// First day of the plan, today when unset.
    pub start: Option<NaiveDate>,
    pub attendees: Vec<String>,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub strategy: PoolStrategy,
    /// Fixed seed for a reproducible plan, thread rng otherwise.
    pub seed: Option<u64>,
}

impl Generate {
    pub fn run(&self, recipes: &[Recipe]) -> Vec<MealPlanDay> {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                generate_weekly_plan(recipes, self, &mut rng)
            }
            None => generate_weekly_plan(recipes, self, &mut rand::rng()),
        }
    }
}

pub struct Pools<'a> {
    pub breakfast: Vec<&'a Recipe>,
    pub main: Vec<&'a Recipe>,
}

impl<'a> Pools<'a> {
    /// Never returns an empty pool unless `recipes` itself is empty.
    pub fn new(
        recipes: &'a [Recipe],
        strategy: PoolStrategy,
        restrictions: &[DietaryRestriction],
    ) -> Self {
        let breakfast = recipes
            .iter()
            .filter(|r| is_breakfast(r, strategy))
            .collect::<Vec<_>>();

        let main = recipes
            .iter()
            .filter(|r| is_main(r, strategy))
            .collect::<Vec<_>>();

        Self {
            breakfast: fallback(narrow(breakfast, restrictions), recipes, restrictions),
            main: fallback(narrow(main, restrictions), recipes, restrictions),
        }
    }
}

fn is_breakfast(recipe: &Recipe, strategy: PoolStrategy) -> bool {
    if recipe.is_classified_as(MealType::Breakfast) {
        return true;
    }

    match strategy {
        PoolStrategy::MealTypes => false,
        PoolStrategy::Heuristic => recipe.has_tag("breakfast") || has_breakfast_title(recipe),
    }
}

fn is_main(recipe: &Recipe, strategy: PoolStrategy) -> bool {
    if recipe.is_classified_as(MealType::Lunch) || recipe.is_classified_as(MealType::Dinner) {
        return true;
    }

    match strategy {
        PoolStrategy::MealTypes => false,
        PoolStrategy::Heuristic => {
            recipe.has_tag("lunch")
                || recipe.has_tag("dinner")
                || (!recipe.is_classified_as(MealType::Breakfast)
                    && !recipe.has_tag("breakfast")
                    && !has_breakfast_title(recipe))
        }
    }
}

fn has_breakfast_title(recipe: &Recipe) -> bool {
    let title = recipe.title.to_lowercase();
    BREAKFAST_KEYWORDS.iter().any(|k| title.contains(k))
}

fn narrow<'a>(pool: Vec<&'a Recipe>, restrictions: &[DietaryRestriction]) -> Vec<&'a Recipe> {
    if restrictions.is_empty() {
        return pool;
    }

    let narrowed = pool
        .iter()
        .copied()
        .filter(|r| r.satisfies(restrictions))
        .collect::<Vec<_>>();

    if narrowed.is_empty() { pool } else { narrowed }
}

fn fallback<'a>(
    pool: Vec<&'a Recipe>,
    recipes: &'a [Recipe],
    restrictions: &[DietaryRestriction],
) -> Vec<&'a Recipe> {
    if !pool.is_empty() {
        return pool;
    }

    narrow(recipes.iter().collect(), restrictions)
}

/// Builds seven consecutive days of meals from `recipes`.
///
/// Each day reshuffles the pools, so the same recipe may repeat across days
/// or within a day. Snack is always the fixed placeholder.
pub fn generate_weekly_plan<R: Rng + ?Sized>(
    recipes: &[Recipe],
    input: &Generate,
    rng: &mut R,
) -> Vec<MealPlanDay> {
    let start = input.start.unwrap_or_else(mealplanner_shared::today);
    let mut pools = Pools::new(recipes, input.strategy, &input.dietary_restrictions);

    tracing::debug!(
        breakfast = pools.breakfast.len(),
        main = pools.main.len(),
        "recipe pools ready"
    );

    let days = mealplanner_shared::week_from(start)
        .into_iter()
        .map(|date| {
            pools.breakfast.shuffle(rng);
            let breakfast = pools.breakfast.first().map(|r| r.id.to_owned());

            pools.main.shuffle(rng);
            let lunch = pools.main.first().map(|r| r.id.to_owned());

            pools.main.shuffle(rng);
            let dinner = pools
                .main
                .get(1)
                .map(|r| r.id.to_owned())
                .or_else(|| lunch.clone());

            let mut day = MealPlanDay::new(date);
            day.meals
                .insert(MealType::Breakfast, Meal::recipe(breakfast, &input.attendees));
            day.meals
                .insert(MealType::Lunch, Meal::recipe(lunch, &input.attendees));
            day.meals
                .insert(MealType::Dinner, Meal::recipe(dinner, &input.attendees));
            day.meals.insert(
                MealType::Snack,
                Meal::custom(SNACK_PLACEHOLDER, &input.attendees),
            );

            day
        })
        .collect::<Vec<_>>();

    tracing::info!(start = %start, recipes = recipes.len(), "weekly plan generated");

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, title: &str, meal_types: &[MealType], tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            ingredients: vec![],
            instructions: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            meal_types: meal_types.to_vec(),
            prep_time_minutes: 5,
            cook_time_minutes: 10,
            servings: 2,
            image: None,
        }
    }

    fn ids(pool: &[&Recipe]) -> Vec<String> {
        let mut ids = pool.iter().map(|r| r.id.to_owned()).collect::<Vec<_>>();
        ids.sort();
        ids
    }

    #[test]
    fn meal_type_pools() {
        let recipes = vec![
            recipe("1", "Oat Porridge", &[MealType::Breakfast], &[]),
            recipe("2", "Curry", &[MealType::Dinner], &[]),
            recipe("3", "Soup", &[MealType::Lunch], &[]),
            recipe("4", "Brunch Eggs", &[MealType::Breakfast, MealType::Lunch], &[]),
        ];

        let pools = Pools::new(&recipes, PoolStrategy::MealTypes, &[]);
        assert_eq!(ids(&pools.breakfast), vec!["1", "4"]);
        assert_eq!(ids(&pools.main), vec!["2", "3", "4"]);
    }

    #[test]
    fn empty_pools_fall_back_to_all_recipes() {
        let recipes = vec![
            recipe("1", "Curry", &[], &[]),
            recipe("2", "Soup", &[], &[]),
        ];

        let pools = Pools::new(&recipes, PoolStrategy::MealTypes, &[]);
        assert_eq!(ids(&pools.breakfast), vec!["1", "2"]);
        assert_eq!(ids(&pools.main), vec!["1", "2"]);
    }

    #[test]
    fn heuristic_uses_tags_and_title_keywords() {
        let recipes = vec![
            recipe("1", "Banana Pancakes", &[], &[]),
            recipe("2", "Chili", &[], &[]),
            recipe("3", "Shakshuka", &[], &["Breakfast"]),
            recipe("4", "Egg Fried Rice", &[], &["dinner"]),
        ];

        let pools = Pools::new(&recipes, PoolStrategy::Heuristic, &[]);
        assert_eq!(ids(&pools.breakfast), vec!["1", "3", "4"]);
        assert_eq!(ids(&pools.main), vec!["2", "4"]);
    }

    #[test]
    fn dietary_restrictions_narrow_pools_when_possible() {
        let recipes = vec![
            recipe("1", "Curry", &[MealType::Dinner], &["Vegan"]),
            recipe("2", "Steak", &[MealType::Dinner], &[]),
            recipe("3", "Porridge", &[MealType::Breakfast], &[]),
        ];

        let pools = Pools::new(&recipes, PoolStrategy::MealTypes, &[DietaryRestriction::Vegan]);
        assert_eq!(ids(&pools.main), vec!["1"]);
        // nothing vegan for breakfast, so the restriction is dropped
        assert_eq!(ids(&pools.breakfast), vec!["3"]);
    }

    #[test]
    fn single_main_recipe_repeats_for_dinner() {
        let recipes = vec![recipe("1", "Curry", &[MealType::Dinner], &[])];
        let input = Generate {
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            seed: Some(7),
            ..Default::default()
        };

        for day in input.run(&recipes) {
            let lunch = day.meal(MealType::Lunch).unwrap();
            let dinner = day.meal(MealType::Dinner).unwrap();
            assert_eq!(lunch.recipe_id.as_deref(), Some("1"));
            assert_eq!(dinner.recipe_id, lunch.recipe_id);
        }
    }
}
