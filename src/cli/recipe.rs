use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use mealplanner_shared::recipe::{Ingredient, MealType, Recipe, RecipeInput};
use mealplanner_store::{StateRepository, Store};
use serde::Deserialize;

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// List every recipe
    List,
    /// Show one recipe in full
    Show { id: String },
    /// Add a recipe
    Add(AddRecipe),
    /// Import recipes from a JSON file (one recipe or an array)
    Import { file: PathBuf },
    /// Delete a recipe, planned meals keep pointing at it
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct AddRecipe {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// "Quantity Unit Name", e.g. "2 cup Rice"
    #[arg(long = "ingredient")]
    pub ingredients: Vec<String>,

    #[arg(long = "instruction")]
    pub instructions: Vec<String>,

    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long = "meal-type")]
    pub meal_types: Vec<MealType>,

    /// Preparation time in minutes
    #[arg(long, default_value_t = 0)]
    pub prep: u32,

    /// Cooking time in minutes
    #[arg(long, default_value_t = 0)]
    pub cook: u32,

    #[arg(long, default_value_t = 1)]
    pub servings: u32,
}

impl From<AddRecipe> for RecipeInput {
    fn from(value: AddRecipe) -> Self {
        RecipeInput {
            title: value.title,
            description: value.description,
            ingredients: value
                .ingredients
                .iter()
                .filter_map(|line| Ingredient::parse_line(line))
                .collect(),
            instructions: value.instructions,
            tags: value.tags,
            meal_types: value.meal_types,
            prep_time_minutes: value.prep,
            cook_time_minutes: value.cook,
            servings: value.servings,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<Recipe>),
    One(Box<Recipe>),
}

#[tracing::instrument(skip(store, out))]
pub fn run<R: StateRepository>(
    store: &mut Store<R>,
    command: RecipeCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        RecipeCommand::List => list(store, out),
        RecipeCommand::Show { id } => {
            let Some(recipe) = store.recipe(&id) else {
                anyhow::bail!("recipe {id} not found");
            };

            show(recipe, out)
        }
        RecipeCommand::Add(input) => {
            let id = store.create_recipe(input.into())?;
            writeln!(out, "Added recipe {id}")?;

            Ok(())
        }
        RecipeCommand::Import { file } => import(store, file, out),
        RecipeCommand::Delete { id } => {
            if store.delete_recipe(&id)? {
                writeln!(out, "Deleted recipe {id}")?;
            } else {
                tracing::warn!(id = %id, "recipe to delete does not exist");
                writeln!(out, "No recipe {id}")?;
            }

            Ok(())
        }
    }
}

fn list<R: StateRepository>(store: &Store<R>, out: &mut impl Write) -> anyhow::Result<()> {
    let recipes = &store.state().recipes;
    if recipes.is_empty() {
        writeln!(out, "No recipes yet.")?;
        return Ok(());
    }

    for recipe in recipes {
        let meal_types = recipe
            .meal_types
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            out,
            "{}  {}  [{}]  {} min",
            recipe.id,
            recipe.title,
            meal_types,
            recipe.total_time_minutes()
        )?;
    }

    Ok(())
}

fn show(recipe: &Recipe, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", recipe.title)?;
    if let Some(description) = &recipe.description {
        writeln!(out, "{description}")?;
    }
    writeln!(
        out,
        "Prep {} min, cook {} min, serves {}",
        recipe.prep_time_minutes, recipe.cook_time_minutes, recipe.servings
    )?;

    writeln!(out, "\nIngredients")?;
    for ingredient in &recipe.ingredients {
        writeln!(
            out,
            "- {} {} {}",
            ingredient.quantity, ingredient.unit, ingredient.name
        )?;
    }

    if !recipe.instructions.is_empty() {
        writeln!(out, "\nInstructions")?;
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            writeln!(out, "{}. {instruction}", step + 1)?;
        }
    }

    if !recipe.tags.is_empty() {
        writeln!(out, "\nTags: {}", recipe.tags.join(", "))?;
    }

    Ok(())
}

fn import<R: StateRepository>(
    store: &mut Store<R>,
    file: PathBuf,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)?;
    let recipes = match serde_json::from_str::<ImportFile>(&content)? {
        ImportFile::Many(recipes) => recipes,
        ImportFile::One(recipe) => vec![*recipe],
    };

    let mut imported = 0;
    for recipe in recipes {
        let id = recipe.id.to_owned();
        match store.add_recipe(recipe) {
            Ok(()) => imported += 1,
            Err(mealplanner_shared::Error::Conflict(reason)) => {
                tracing::warn!(id = %id, reason = %reason, "recipe skipped");
                writeln!(out, "Skipped {id}: already exists")?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    writeln!(out, "Imported {imported} recipe(s)")?;

    Ok(())
}
