use mealplanner_shared::recipe::{Ingredient, IngredientUnit, MealType, Recipe};
use mealplanner_shared::{AppState, Preferences};

/// State of a fresh install: a handful of recipes, nothing else.
pub fn initial_state() -> AppState {
    AppState {
        recipes: seed_recipes(),
        pantry: vec![],
        meal_plan: vec![],
        preferences: Preferences::default(),
    }
}

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    ingredients: &'static [(&'static str, &'static str, IngredientUnit)],
    instructions: &'static [&'static str],
    tags: &'static [&'static str],
    meal_types: &'static [MealType],
    prep: u32,
    cook: u32,
    servings: u32,
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: "1",
        title: "Overnight Oats",
        description: "Creamy oats soaked overnight with berries.",
        ingredients: &[
            ("Rolled oats", "1", IngredientUnit::Cup),
            ("Milk", "250", IngredientUnit::Ml),
            ("Berries", "1", IngredientUnit::Cup),
            ("Honey", "1", IngredientUnit::Tbsp),
        ],
        instructions: &[
            "Mix oats and milk in a jar.",
            "Refrigerate overnight.",
            "Top with berries and honey.",
        ],
        tags: &["Vegetarian", "Quick"],
        meal_types: &[MealType::Breakfast],
        prep: 5,
        cook: 0,
        servings: 2,
    },
    Seed {
        id: "2",
        title: "Scrambled Eggs on Toast",
        description: "Soft eggs on buttered sourdough.",
        ingredients: &[
            ("Eggs", "4", IngredientUnit::Piece),
            ("Sourdough bread", "2", IngredientUnit::Piece),
            ("Butter", "1", IngredientUnit::Tbsp),
            ("Salt", "to taste", IngredientUnit::Tsp),
        ],
        instructions: &[
            "Whisk the eggs with a pinch of salt.",
            "Cook gently in butter, stirring.",
            "Serve on toasted bread.",
        ],
        tags: &["Vegetarian"],
        meal_types: &[MealType::Breakfast],
        prep: 5,
        cook: 5,
        servings: 2,
    },
    Seed {
        id: "3",
        title: "Chicken Stir Fry",
        description: "Chicken and vegetables with soy and ginger.",
        ingredients: &[
            ("Chicken breast", "400", IngredientUnit::G),
            ("Rice", "1", IngredientUnit::Cup),
            ("Bell pepper", "2", IngredientUnit::Piece),
            ("Soy sauce", "3", IngredientUnit::Tbsp),
            ("Ginger", "thumb-sized", IngredientUnit::Piece),
        ],
        instructions: &[
            "Cook the rice.",
            "Stir fry sliced chicken until golden.",
            "Add peppers, ginger and soy sauce.",
        ],
        tags: &["Dairy-Free"],
        meal_types: &[MealType::Lunch, MealType::Dinner],
        prep: 15,
        cook: 15,
        servings: 2,
    },
    Seed {
        id: "4",
        title: "Lentil Soup",
        description: "Hearty red lentil soup.",
        ingredients: &[
            ("Red lentils", "200", IngredientUnit::G),
            ("Onion", "1", IngredientUnit::Piece),
            ("Chopped tomatoes", "1", IngredientUnit::Can),
            ("Vegetable stock", "1", IngredientUnit::L),
        ],
        instructions: &[
            "Soften the onion.",
            "Add lentils, tomatoes and stock.",
            "Simmer for 25 minutes and blend.",
        ],
        tags: &["Vegan", "Vegetarian", "Gluten-Free", "Dairy-Free"],
        meal_types: &[MealType::Lunch],
        prep: 10,
        cook: 30,
        servings: 4,
    },
    Seed {
        id: "5",
        title: "Spaghetti Bolognese",
        description: "Classic slow-cooked beef ragu.",
        ingredients: &[
            ("Spaghetti", "1", IngredientUnit::Pack),
            ("Minced beef", "500", IngredientUnit::G),
            ("Onion", "1", IngredientUnit::Piece),
            ("Chopped tomatoes", "2", IngredientUnit::Can),
        ],
        instructions: &[
            "Brown the beef with the onion.",
            "Add tomatoes and simmer for 40 minutes.",
            "Serve over cooked spaghetti.",
        ],
        tags: &["Family"],
        meal_types: &[MealType::Dinner],
        prep: 10,
        cook: 45,
        servings: 4,
    },
    Seed {
        id: "6",
        title: "Chickpea Curry",
        description: "Coconut chickpea curry with spinach.",
        ingredients: &[
            ("Chickpeas", "2", IngredientUnit::Can),
            ("Coconut milk", "400", IngredientUnit::Ml),
            ("Spinach", "100", IngredientUnit::G),
            ("Curry paste", "2", IngredientUnit::Tbsp),
            ("Rice", "1", IngredientUnit::Cup),
        ],
        instructions: &[
            "Fry the curry paste.",
            "Add chickpeas and coconut milk, simmer 15 minutes.",
            "Stir in spinach and serve with rice.",
        ],
        tags: &["Vegan", "Vegetarian", "Gluten-Free"],
        meal_types: &[MealType::Dinner],
        prep: 10,
        cook: 20,
        servings: 4,
    },
];

pub fn seed_recipes() -> Vec<Recipe> {
    SEEDS.iter().map(Seed::to_recipe).collect()
}

impl Seed {
    fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            description: Some(self.description.to_owned()),
            ingredients: self
                .ingredients
                .iter()
                .map(|(name, quantity, unit)| Ingredient::new(*name, *quantity, *unit))
                .collect(),
            instructions: self.instructions.iter().map(|s| s.to_string()).collect(),
            tags: self.tags.iter().map(|s| s.to_string()).collect(),
            meal_types: self.meal_types.to_vec(),
            prep_time_minutes: self.prep,
            cook_time_minutes: self.cook,
            servings: self.servings,
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_recipes_are_plannable() {
        let recipes = seed_recipes();
        let ids = recipes.iter().map(|r| r.id.as_str()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), recipes.len());

        assert!(recipes.iter().any(|r| r.is_classified_as(MealType::Breakfast)));
        assert!(
            recipes
                .iter()
                .filter(|r| r.is_classified_as(MealType::Lunch)
                    || r.is_classified_as(MealType::Dinner))
                .count()
                >= 2
        );
    }
}
