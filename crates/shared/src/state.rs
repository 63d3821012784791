use serde::{Deserialize, Serialize};

use crate::mealplan::MealPlanDay;
use crate::pantry::PantryItem;
use crate::recipe::{DietaryRestriction, Recipe};

pub const DEFAULT_HOUSEHOLD: [&str; 2] = ["Ciara", "Daniel"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_users")]
    pub users: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

fn default_users() -> Vec<String> {
    DEFAULT_HOUSEHOLD.iter().map(|u| u.to_string()).collect()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            users: default_users(),
            dietary_restrictions: vec![],
        }
    }
}

/// The aggregate root persisted as a single JSON document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub pantry: Vec<PantryItem>,
    #[serde(default)]
    pub meal_plan: Vec<MealPlanDay>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl AppState {
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}
