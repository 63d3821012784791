use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::recipe::MealType;

pub const DINING_OUT: &str = "Dining Out";
pub const SNACK_PLACEHOLDER: &str = "Fruit or Nuts";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Weak reference, the recipe may have been deleted since.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_description: Option<String>,
    #[serde(default)]
    pub is_dining_out: bool,
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl Meal {
    pub fn recipe(recipe_id: Option<String>, attendees: &[String]) -> Self {
        Self {
            recipe_id,
            attendees: attendees.to_vec(),
            ..Default::default()
        }
    }

    pub fn custom(description: impl Into<String>, attendees: &[String]) -> Self {
        Self {
            custom_description: Some(description.into()),
            attendees: attendees.to_vec(),
            ..Default::default()
        }
    }

    pub fn dining_out(attendees: &[String]) -> Self {
        Self {
            custom_description: Some(DINING_OUT.to_owned()),
            is_dining_out: true,
            attendees: attendees.to_vec(),
            ..Default::default()
        }
    }

    /// Older documents only carry the "Dining Out" description.
    pub fn is_eaten_out(&self) -> bool {
        self.is_dining_out || self.custom_description.as_deref() == Some(DINING_OUT)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: BTreeMap<MealType, Meal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

impl MealPlanDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: BTreeMap::new(),
            events: vec![],
        }
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&Meal> {
        self.meals.get(&meal_type)
    }

    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.meals
            .values()
            .filter_map(|meal| meal.recipe_id.as_deref())
    }
}
