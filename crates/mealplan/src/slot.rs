use chrono::NaiveDate;
use mealplanner_shared::mealplan::{Meal, MealPlanDay};
use mealplanner_shared::recipe::{MealType, Recipe};

pub const UNKNOWN_RECIPE: &str = "Unknown Recipe";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MealChoice {
    Recipe(String),
    Custom(String),
    DiningOut,
    Clear,
}

/// What a slot shows once its weak recipe reference is resolved.
#[derive(Debug, PartialEq)]
pub enum SlotView<'a> {
    Empty,
    Recipe(&'a Recipe),
    UnknownRecipe(&'a str),
    DiningOut,
    Custom(&'a str),
}

impl SlotView<'_> {
    pub fn label(&self) -> String {
        match self {
            SlotView::Empty => "No meal planned".to_owned(),
            SlotView::Recipe(recipe) => recipe.title.to_owned(),
            SlotView::UnknownRecipe(_) => UNKNOWN_RECIPE.to_owned(),
            SlotView::DiningOut => mealplanner_shared::mealplan::DINING_OUT.to_owned(),
            SlotView::Custom(text) => text.to_string(),
        }
    }
}

pub fn find_recipe<'a>(recipes: &'a [Recipe], id: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|r| r.id == id)
}

pub fn resolve_slot<'a>(meal: Option<&'a Meal>, recipes: &'a [Recipe]) -> SlotView<'a> {
    let Some(meal) = meal else {
        return SlotView::Empty;
    };

    if meal.is_eaten_out() {
        return SlotView::DiningOut;
    }

    if let Some(id) = meal.recipe_id.as_deref() {
        return match find_recipe(recipes, id) {
            Some(recipe) => SlotView::Recipe(recipe),
            None => SlotView::UnknownRecipe(id),
        };
    }

    match meal.custom_description.as_deref() {
        Some(text) => SlotView::Custom(text),
        None => SlotView::Empty,
    }
}

/// Returns a copy of `plan` with one slot replaced.
pub fn set_meal(
    plan: &[MealPlanDay],
    date: NaiveDate,
    meal_type: MealType,
    choice: MealChoice,
    attendees: &[String],
) -> mealplanner_shared::Result<Vec<MealPlanDay>> {
    if !plan.iter().any(|day| day.date == date) {
        mealplanner_shared::not_found!("no plan day for {date}");
    }

    let plan = plan
        .iter()
        .map(|day| {
            if day.date != date {
                return day.clone();
            }

            let mut day = day.clone();
            let attendees = day
                .meal(meal_type)
                .map(|m| m.attendees.to_vec())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| attendees.to_vec());

            match &choice {
                MealChoice::Recipe(id) => {
                    day.meals
                        .insert(meal_type, Meal::recipe(Some(id.to_owned()), &attendees));
                }
                MealChoice::Custom(text) => {
                    day.meals
                        .insert(meal_type, Meal::custom(text.to_owned(), &attendees));
                }
                MealChoice::DiningOut => {
                    day.meals.insert(meal_type, Meal::dining_out(&attendees));
                }
                MealChoice::Clear => {
                    day.meals.remove(&meal_type);
                }
            }

            day
        })
        .collect();

    Ok(plan)
}
