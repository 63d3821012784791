use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

pub const STATE_FILE_NAME: &str = "state.json";

/// Where the serialized application state lives between runs.
pub trait StateRepository {
    fn load(&self) -> mealplanner_shared::Result<Option<String>>;
    fn save(&mut self, document: &str) -> mealplanner_shared::Result<()>;
    fn clear(&mut self) -> mealplanner_shared::Result<()>;
    /// Keeps a copy of a document that could not be fully read.
    fn backup(&mut self, document: &str) -> mealplanner_shared::Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    document: Option<String>,
    backup: Option<String>,
}

impl MemoryRepository {
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            backup: None,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn backup_document(&self) -> Option<&str> {
        self.backup.as_deref()
    }
}

impl StateRepository for MemoryRepository {
    fn load(&self) -> mealplanner_shared::Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &str) -> mealplanner_shared::Result<()> {
        self.document = Some(document.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> mealplanner_shared::Result<()> {
        self.document = None;
        Ok(())
    }

    fn backup(&mut self, document: &str) -> mealplanner_shared::Result<()> {
        self.backup = Some(document.to_owned());
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `state.json` in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("app", "mealplanner", "mealplanner")
            .map(|proj| proj.data_dir().join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `state.json.bak` next to the state file.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    /// Write to a sibling `.tmp` file then rename over the target.
    fn atomic_write(&self, contents: &str) -> mealplanner_shared::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

impl StateRepository for JsonFileRepository {
    fn load(&self) -> mealplanner_shared::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, document: &str) -> mealplanner_shared::Result<()> {
        self.atomic_write(document)?;
        tracing::debug!(path = %self.path.display(), bytes = document.len(), "state saved");
        Ok(())
    }

    fn clear(&mut self) -> mealplanner_shared::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn backup(&mut self, document: &str) -> mealplanner_shared::Result<()> {
        let path = self.backup_path();
        fs::write(&path, document)?;
        tracing::warn!(path = %path.display(), "unreadable state backed up");
        Ok(())
    }
}
