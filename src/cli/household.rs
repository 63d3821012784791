use std::io::Write;

use clap::Subcommand;
use mealplanner_shared::recipe::DietaryRestriction;
use mealplanner_store::{StateRepository, Store};

#[derive(Subcommand, Debug)]
pub enum HouseholdCommand {
    /// Replace the people every planned meal is for
    Set {
        #[arg(required = true)]
        members: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DietCommand {
    /// Replace the dietary restrictions, none clears them
    Set { restrictions: Vec<DietaryRestriction> },
}

#[tracing::instrument(skip(store, out))]
pub fn run<R: StateRepository>(
    store: &mut Store<R>,
    command: HouseholdCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        HouseholdCommand::Set { members } => {
            let members = members
                .into_iter()
                .map(|m| m.trim().to_owned())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>();

            if members.is_empty() {
                anyhow::bail!("household needs at least one member");
            }

            writeln!(out, "Household: {}", members.join(", "))?;
            store.set_users(members)?;
        }
    }

    Ok(())
}

#[tracing::instrument(skip(store, out))]
pub fn run_diet<R: StateRepository>(
    store: &mut Store<R>,
    command: DietCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        DietCommand::Set { restrictions } => {
            store.set_dietary_restrictions(restrictions)?;

            let current = &store.state().preferences.dietary_restrictions;
            if current.is_empty() {
                writeln!(out, "No dietary restrictions.")?;
            } else {
                let names = current.iter().map(|r| r.to_string()).collect::<Vec<_>>();
                writeln!(out, "Dietary restrictions: {}", names.join(", "))?;
            }
        }
    }

    Ok(())
}
