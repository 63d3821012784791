use std::io::Write;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use mealplanner_mealplan::{MealChoice, PoolStrategy, resolve_slot};
use mealplanner_shared::mealplan::MealPlanDay;
use mealplanner_shared::recipe::{MealType, Recipe};
use mealplanner_store::{StateRepository, Store};
use strum::VariantArray;

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Replace the plan with a new week
    Generate {
        /// First day, YYYY-MM-DD, today when omitted
        #[arg(long, value_parser = mealplanner_shared::parse_iso_date)]
        start: Option<NaiveDate>,
        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,
        /// Also sort recipes by tags and title keywords
        #[arg(long)]
        heuristic: bool,
    },
    /// Print the current plan
    Show,
    /// Change a single meal
    Set {
        /// Day to change, YYYY-MM-DD
        #[arg(value_parser = mealplanner_shared::parse_iso_date)]
        date: NaiveDate,
        meal_type: MealType,
        #[command(flatten)]
        choice: ChoiceArgs,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ChoiceArgs {
    /// Plan a recipe by id
    #[arg(long)]
    pub recipe: Option<String>,
    /// Free text meal
    #[arg(long)]
    pub custom: Option<String>,
    #[arg(long)]
    pub dining_out: bool,
    /// Remove the meal
    #[arg(long)]
    pub clear: bool,
}

impl From<ChoiceArgs> for MealChoice {
    fn from(value: ChoiceArgs) -> Self {
        match (value.recipe, value.custom) {
            (Some(id), _) => MealChoice::Recipe(id),
            (None, Some(text)) => MealChoice::Custom(text),
            (None, None) if value.dining_out => MealChoice::DiningOut,
            (None, None) => MealChoice::Clear,
        }
    }
}

#[tracing::instrument(skip(store, out))]
pub fn run<R: StateRepository>(
    store: &mut Store<R>,
    command: PlanCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        PlanCommand::Generate {
            start,
            seed,
            heuristic,
        } => {
            let strategy = if heuristic {
                PoolStrategy::Heuristic
            } else {
                PoolStrategy::MealTypes
            };

            store.generate_plan(start, strategy, seed)?;
            render(&store.state().meal_plan, &store.state().recipes, out)
        }
        PlanCommand::Show => render(&store.state().meal_plan, &store.state().recipes, out),
        PlanCommand::Set {
            date,
            meal_type,
            choice,
        } => {
            store.set_meal(date, meal_type, choice.into())?;

            let day = store.state().meal_plan.iter().find(|d| d.date == date);
            let label = resolve_slot(
                day.and_then(|d| d.meal(meal_type)),
                &store.state().recipes,
            )
            .label();
            writeln!(out, "{date} {meal_type}: {label}")?;

            Ok(())
        }
    }
}

fn render(plan: &[MealPlanDay], recipes: &[Recipe], out: &mut impl Write) -> anyhow::Result<()> {
    if plan.is_empty() {
        writeln!(out, "No meal plan yet. Run `mealplanner plan generate`.")?;
        return Ok(());
    }

    for day in plan {
        writeln!(out, "{}", day.date.format("%A %Y-%m-%d"))?;

        for meal_type in MealType::VARIANTS {
            let name = meal_type.to_string();
            let label = resolve_slot(day.meal(*meal_type), recipes).label();
            writeln!(out, "  {name:<9} {label}")?;
        }

        for event in &day.events {
            writeln!(out, "  * {event}")?;
        }
    }

    Ok(())
}
