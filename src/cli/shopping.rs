use std::io::Write;

use clap::Args;
use mealplanner_shopping::ShoppingList;
use mealplanner_store::{StateRepository, Store};

#[derive(Args, Debug)]
pub struct ShoppingArgs {
    /// Mark an item as already in the basket (repeatable)
    #[arg(long)]
    pub check: Vec<String>,
}

/// Prints the printable list for the current plan. Checks only affect this
/// printout.
#[tracing::instrument(skip(store, out))]
pub fn run<R: StateRepository>(
    store: &Store<R>,
    args: ShoppingArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut list = ShoppingList::from(store.shopping_list().to_vec());

    for name in &args.check {
        list.check(name)?;
    }

    write!(out, "{}", list.render_printable())?;

    Ok(())
}
