use std::io::Write;

use chrono::NaiveDate;
use clap::Subcommand;
use mealplanner_shared::pantry::PantryInput;
use mealplanner_shared::recipe::IngredientUnit;
use mealplanner_shopping::quantity::format_quantity;
use mealplanner_store::{StateRepository, Store};

/// Items expiring within this many days are flagged.
const EXPIRY_WARNING_DAYS: i64 = 3;

#[derive(Subcommand, Debug)]
pub enum PantryCommand {
    /// List pantry stock
    List,
    /// Add stock to the pantry
    Add {
        name: String,
        quantity: f64,
        #[arg(long, default_value_t = IngredientUnit::Piece)]
        unit: IngredientUnit,
        /// Expiry date, YYYY-MM-DD
        #[arg(long, value_parser = mealplanner_shared::parse_iso_date)]
        expires: Option<NaiveDate>,
    },
    /// Remove an item by id
    Remove { id: String },
}

#[tracing::instrument(skip(store, out))]
pub fn run<R: StateRepository>(
    store: &mut Store<R>,
    command: PantryCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        PantryCommand::List => {
            let pantry = &store.state().pantry;
            if pantry.is_empty() {
                writeln!(out, "Pantry is empty.")?;
                return Ok(());
            }

            let today = mealplanner_shared::today();
            for item in pantry {
                let note = match item.expiry_date {
                    Some(_) if item.is_expired(today) => " (expired)".to_owned(),
                    Some(date) if item.expires_within(today, EXPIRY_WARNING_DAYS) => {
                        format!(" (expires {date}, soon)")
                    }
                    Some(date) => format!(" (expires {date})"),
                    None => String::new(),
                };

                writeln!(
                    out,
                    "{}  {}  {} {}{note}",
                    item.id,
                    item.name,
                    format_quantity(item.quantity),
                    item.unit
                )?;
            }

            Ok(())
        }
        PantryCommand::Add {
            name,
            quantity,
            unit,
            expires,
        } => {
            let id = store.add_pantry_item(PantryInput {
                name,
                quantity,
                unit,
                expiry_date: expires,
            })?;
            writeln!(out, "Added pantry item {id}")?;

            Ok(())
        }
        PantryCommand::Remove { id } => {
            if store.remove_pantry_item(&id)? {
                writeln!(out, "Removed pantry item {id}")?;
            } else {
                writeln!(out, "No pantry item {id}")?;
            }

            Ok(())
        }
    }
}
