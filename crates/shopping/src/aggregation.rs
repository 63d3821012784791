use std::collections::HashMap;

use mealplanner_shared::mealplan::MealPlanDay;
use mealplanner_shared::pantry::PantryItem;
use mealplanner_shared::recipe::{IngredientUnit, Recipe};
use serde::Serialize;

use crate::quantity::{format_quantity, parse_quantity};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub quantity: String,
    pub unit: IngredientUnit,
    pub checked: bool,
}

#[derive(Debug)]
struct Needed {
    quantity: f64,
    unit: IngredientUnit,
}

/// Derive what has to be bought for `plan`.
///
/// Ingredients are summed across every planned, non dining-out meal under
/// their lower-cased name; the last unit seen wins and no conversion is
/// attempted. Pantry stock is then subtracted by exact (case-insensitive)
/// name and fully covered entries are dropped. Quantities without a numeric
/// prefix count as zero.
pub fn generate_shopping_list(
    plan: &[MealPlanDay],
    recipes: &[Recipe],
    pantry: &[PantryItem],
) -> Vec<ShoppingListItem> {
    let mut index: HashMap<&str, &Recipe> = HashMap::new();
    for recipe in recipes {
        index.entry(recipe.id.as_str()).or_insert(recipe);
    }

    let mut needed: HashMap<String, Needed> = HashMap::new();

    for day in plan {
        for meal in day.meals.values() {
            if meal.is_dining_out {
                continue;
            }

            let Some(recipe_id) = meal.recipe_id.as_deref() else {
                continue;
            };

            let Some(recipe) = index.get(recipe_id) else {
                tracing::debug!(date = %day.date, recipe_id, "planned recipe no longer exists");
                continue;
            };

            for ingredient in &recipe.ingredients {
                let quantity = parse_quantity(&ingredient.quantity).unwrap_or_else(|| {
                    tracing::debug!(
                        ingredient = %ingredient.name,
                        quantity = %ingredient.quantity,
                        "non-numeric quantity counted as zero"
                    );
                    0.0
                });

                let entry = needed
                    .entry(ingredient.name.to_lowercase())
                    .or_insert(Needed {
                        quantity: 0.0,
                        unit: ingredient.unit,
                    });
                entry.quantity += quantity;
                entry.unit = ingredient.unit;
            }
        }
    }

    for item in pantry {
        let key = item.name.to_lowercase();
        let Some(entry) = needed.get_mut(&key) else {
            continue;
        };

        entry.quantity -= item.quantity;
        if entry.quantity <= 0.0 {
            tracing::debug!(ingredient = %key, "covered by pantry stock");
            needed.remove(&key);
        }
    }

    let mut items = needed
        .into_iter()
        .map(|(name, needed)| ShoppingListItem {
            name: capitalize(&name),
            quantity: format_quantity(needed.quantity),
            unit: needed.unit,
            checked: false,
        })
        .collect::<Vec<_>>();

    items.sort_by(|a, b| a.name.cmp(&b.name));

    items
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("rice"), "Rice");
        assert_eq!(capitalize("olive oil"), "Olive oil");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(generate_shopping_list(&[], &[], &[]).is_empty());
    }
}
