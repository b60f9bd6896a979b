//! File-backed recipe provider

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Recipe;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("recipe file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recipes keyed by their stable id, optionally mirrored to a JSON file
#[derive(Debug, Default)]
pub struct RecipeBook {
    path: Option<PathBuf>,
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// In-memory book that is never written back
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { path: None, recipes }
    }

    /// Load a JSON array of recipes. A missing file yields an empty book.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let path = path.as_ref().to_path_buf();

        let recipes = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<Vec<Recipe>>(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Recipe file {} not found, starting with no recipes", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loaded {} recipes from {}", recipes.len(), path.display());
        Ok(Self {
            path: Some(path),
            recipes,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Stamp the last-used time of a recipe; returns false for unknown ids
    pub fn touch(&mut self, id: &str, at: DateTime<Utc>) -> bool {
        match self.recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                recipe.last_used_at = Some(at);
                debug!("Recipe {} last used at {}", id, at);
                true
            }
            None => false,
        }
    }

    /// Serialize all recipes in their export shape
    pub fn export(&self) -> Result<String, RecipeError> {
        Ok(serde_json::to_string_pretty(&self.recipes)?)
    }
}

/// Write an exported snapshot, replacing the file atomically
pub async fn write_snapshot(path: &Path, json: String) -> Result<(), RecipeError> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            brewer: "Chemex".to_string(),
            brewer_id: None,
            steps: Vec::new(),
            created_at: now,
            updated_at: now,
            last_used_at: None,
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let book = RecipeBook::load(dir.path().join("recipes.json")).await.expect("load");
        assert!(book.list().is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recipes.json");
        tokio::fs::write(&path, "{ not json").await.expect("write");

        let err = RecipeBook::load(&path).await.expect_err("should fail");
        assert!(matches!(err, RecipeError::Parse(_)));
    }

    #[tokio::test]
    async fn touch_survives_a_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recipes.json");
        let mut book = RecipeBook::from_recipes(vec![recipe("a"), recipe("b")]);

        let at = Utc::now();
        assert!(book.touch("b", at));
        assert!(!book.touch("missing", at));
        write_snapshot(&path, book.export().expect("export")).await.expect("write");

        let reloaded = RecipeBook::load(&path).await.expect("load");
        assert_eq!(reloaded.list().len(), 2);
        assert_eq!(reloaded.get("b").and_then(|r| r.last_used_at), Some(at));
        assert!(reloaded.get("a").and_then(|r| r.last_used_at).is_none());
        assert_eq!(reloaded.path(), Some(path.as_path()));
    }
}
