pub mod household;
pub mod pantry;
pub mod plan;
pub mod recipe;
pub mod shopping;

use std::io::Write;
use std::path::PathBuf;

use mealplanner_shared::AppState;
use mealplanner_store::{JsonFileRepository, StateRepository, Store};

use crate::Config;

/// State used when nothing has been saved yet, with the configured household.
pub fn initial_state(config: &Config) -> AppState {
    let mut state = mealplanner_store::initial_state();
    state.preferences.users = config.household.members.to_vec();
    state
}

pub fn state_path(config: &Config) -> anyhow::Result<PathBuf> {
    match &config.storage.path {
        Some(path) => Ok(path.to_owned()),
        None => JsonFileRepository::default_path()
            .ok_or_else(|| anyhow::anyhow!("no data directory available, set storage.path")),
    }
}

pub fn open_store(config: &Config) -> anyhow::Result<Store<JsonFileRepository>> {
    let path = state_path(config)?;
    tracing::debug!(path = %path.display(), "opening state");

    Ok(Store::open_with(
        JsonFileRepository::new(path),
        initial_state(config),
    )?)
}

#[tracing::instrument(skip(store, out))]
pub fn reset<R: StateRepository>(store: &mut Store<R>, out: &mut impl Write) -> anyhow::Result<()> {
    store.reset()?;
    writeln!(out, "All data reset to defaults.")?;

    Ok(())
}
