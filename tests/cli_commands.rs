//! Tests for CLI commands (recipe, pantry, plan, shopping, household, reset)

use chrono::NaiveDate;
use mealplanner::Config;
use mealplanner::cli::household::{DietCommand, HouseholdCommand};
use mealplanner::cli::pantry::PantryCommand;
use mealplanner::cli::plan::{ChoiceArgs, PlanCommand};
use mealplanner::cli::recipe::{AddRecipe, RecipeCommand};
use mealplanner::cli::shopping::ShoppingArgs;
use mealplanner_shared::recipe::{DietaryRestriction, IngredientUnit, MealType};
use mealplanner_store::{MemoryRepository, Store};
use temp_dir::TempDir;

fn store() -> anyhow::Result<Store<MemoryRepository>> {
    let config = Config::default();
    Ok(Store::open_with(
        MemoryRepository::default(),
        mealplanner::cli::initial_state(&config),
    )?)
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8_lossy(&buffer).into_owned()
}

fn monday() -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 6, 3).ok_or(anyhow::anyhow!("bad date"))
}

fn add_rice_bowl(store: &mut Store<MemoryRepository>) -> anyhow::Result<String> {
    let mut out = vec![];
    mealplanner::cli::recipe::run(
        store,
        RecipeCommand::Add(AddRecipe {
            title: "Rice bowl".to_owned(),
            description: None,
            ingredients: vec!["2 cup Rice".to_owned(), "to taste salt".to_owned()],
            instructions: vec!["Cook".to_owned()],
            tags: vec![],
            meal_types: vec![MealType::Lunch],
            prep: 5,
            cook: 10,
            servings: 2,
        }),
        &mut out,
    )?;

    let text = output(out);
    let id = text
        .trim()
        .strip_prefix("Added recipe ")
        .ok_or(anyhow::anyhow!("unexpected output {text}"))?;

    Ok(id.to_owned())
}

#[test]
fn test_recipe_add_show_delete() -> anyhow::Result<()> {
    let mut store = store()?;
    let id = add_rice_bowl(&mut store)?;

    let mut out = vec![];
    mealplanner::cli::recipe::run(&mut store, RecipeCommand::Show { id: id.clone() }, &mut out)?;
    let text = output(out);
    assert!(text.starts_with("Rice bowl\n"));
    assert!(text.contains("- 2 cup Rice"));
    assert!(text.contains("- 1 piece to taste salt"));
    assert!(text.contains("1. Cook"));

    let mut out = vec![];
    mealplanner::cli::recipe::run(&mut store, RecipeCommand::List, &mut out)?;
    assert!(output(out).contains(&format!("{id}  Rice bowl  [Lunch]  15 min")));

    let mut out = vec![];
    mealplanner::cli::recipe::run(&mut store, RecipeCommand::Delete { id: id.clone() }, &mut out)?;
    assert_eq!(output(out), format!("Deleted recipe {id}\n"));
    assert!(store.recipe(&id).is_none());

    let result =
        mealplanner::cli::recipe::run(&mut store, RecipeCommand::Show { id }, &mut Vec::<u8>::new());
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_recipe_import_skips_existing_ids() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let file = dir.child("recipes.json");
    std::fs::write(
        &file,
        r#"[
            {"id": "1", "title": "Duplicate of a seed"},
            {"id": "imported", "title": "Pancakes", "mealTypes": ["Breakfast"],
             "ingredients": [{"name": "Flour", "quantity": "200", "unit": "g"}]}
        ]"#,
    )?;

    let mut store = store()?;
    let mut out = vec![];
    mealplanner::cli::recipe::run(&mut store, RecipeCommand::Import { file }, &mut out)?;

    let text = output(out);
    assert!(text.contains("Skipped 1: already exists"));
    assert!(text.ends_with("Imported 1 recipe(s)\n"));

    let pancakes = store
        .recipe("imported")
        .ok_or(anyhow::anyhow!("not imported"))?;
    assert_eq!(pancakes.ingredients[0].unit, IngredientUnit::G);
    assert_eq!(pancakes.servings, 1);

    Ok(())
}

#[test]
fn test_plan_generate_set_and_shopping() -> anyhow::Result<()> {
    let mut store = store()?;
    let id = add_rice_bowl(&mut store)?;

    let mut out = vec![];
    mealplanner::cli::plan::run(
        &mut store,
        PlanCommand::Generate {
            start: Some(monday()?),
            seed: Some(42),
            heuristic: false,
        },
        &mut out,
    )?;
    let text = output(out);
    assert!(text.starts_with("Monday 2024-06-03\n"));
    assert!(text.contains("Sunday 2024-06-09"));
    assert_eq!(text.matches("Fruit or Nuts").count(), 7);

    for day in store.state().meal_plan.clone() {
        for meal_type in [MealType::Breakfast, MealType::Lunch, MealType::Dinner] {
            mealplanner::cli::plan::run(
                &mut store,
                PlanCommand::Set {
                    date: day.date,
                    meal_type,
                    choice: ChoiceArgs {
                        recipe: None,
                        custom: None,
                        dining_out: true,
                        clear: false,
                    },
                },
                &mut Vec::<u8>::new(),
            )?;
        }
    }

    let mut out = vec![];
    mealplanner::cli::plan::run(
        &mut store,
        PlanCommand::Set {
            date: monday()?,
            meal_type: MealType::Lunch,
            choice: ChoiceArgs {
                recipe: Some(id),
                custom: None,
                dining_out: false,
                clear: false,
            },
        },
        &mut out,
    )?;
    assert_eq!(output(out), "2024-06-03 Lunch: Rice bowl\n");

    let mut out = vec![];
    mealplanner::cli::shopping::run(
        &store,
        ShoppingArgs {
            check: vec!["rice".to_owned()],
        },
        &mut out,
    )?;
    assert_eq!(
        output(out),
        "Shopping List\n[x] Rice - 2 cup\n[ ] To taste salt - 1 piece\n1 of 2 items left\n"
    );

    let mut out = vec![];
    mealplanner::cli::plan::run(&mut store, PlanCommand::Show, &mut out)?;
    assert!(output(out).contains("Dining Out"));

    Ok(())
}

#[test]
fn test_pantry_covers_shopping_needs() -> anyhow::Result<()> {
    let mut store = store()?;
    store.update_meal_plan(vec![])?;

    let mut out = vec![];
    mealplanner::cli::pantry::run(
        &mut store,
        PantryCommand::Add {
            name: "Rice".to_owned(),
            quantity: 1.5,
            unit: IngredientUnit::Cup,
            expires: None,
        },
        &mut out,
    )?;
    assert!(output(out).starts_with("Added pantry item "));

    let mut out = vec![];
    mealplanner::cli::pantry::run(&mut store, PantryCommand::List, &mut out)?;
    assert!(output(out).contains("  Rice  1.5 cup\n"));

    let id = store.state().pantry[0].id.clone();
    let mut out = vec![];
    mealplanner::cli::pantry::run(&mut store, PantryCommand::Remove { id }, &mut out)?;
    assert!(output(out).starts_with("Removed pantry item "));
    assert!(store.state().pantry.is_empty());

    let mut out = vec![];
    mealplanner::cli::shopping::run(&store, ShoppingArgs { check: vec![] }, &mut out)?;
    assert_eq!(output(out), "Shopping List\nNothing to buy.\n");

    Ok(())
}

#[test]
fn test_household_and_diet() -> anyhow::Result<()> {
    let mut store = store()?;

    let mut out = vec![];
    mealplanner::cli::household::run(
        &mut store,
        HouseholdCommand::Set {
            members: vec![" Ana ".to_owned(), "Ben".to_owned()],
        },
        &mut out,
    )?;
    assert_eq!(output(out), "Household: Ana, Ben\n");
    assert_eq!(store.state().preferences.users, vec!["Ana", "Ben"]);

    let result = mealplanner::cli::household::run(
        &mut store,
        HouseholdCommand::Set {
            members: vec!["  ".to_owned()],
        },
        &mut Vec::<u8>::new(),
    );
    assert!(result.is_err());

    let mut out = vec![];
    mealplanner::cli::household::run_diet(
        &mut store,
        DietCommand::Set {
            restrictions: vec![DietaryRestriction::Vegan, DietaryRestriction::NutFree],
        },
        &mut out,
    )?;
    assert_eq!(output(out), "Dietary restrictions: Vegan, Nut-Free\n");

    let mut out = vec![];
    mealplanner::cli::household::run_diet(
        &mut store,
        DietCommand::Set {
            restrictions: vec![],
        },
        &mut out,
    )?;
    assert_eq!(output(out), "No dietary restrictions.\n");

    Ok(())
}

#[test]
fn test_reset_restores_seed_data() -> anyhow::Result<()> {
    let mut store = store()?;
    let seeded = store.state().clone();
    add_rice_bowl(&mut store)?;

    let mut out = vec![];
    mealplanner::cli::reset(&mut store, &mut out)?;
    assert_eq!(output(out), "All data reset to defaults.\n");

    assert_eq!(store.state(), &seeded);
    assert!(store.repository().document().is_none());

    Ok(())
}
