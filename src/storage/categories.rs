//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::config::CategoryMatching;
use crate::error::LedgerError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, CategoryStore};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut list: Vec<Category>) -> Vec<Category> {
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        list
    }
}

impl CategoryStore for CategoryRepository {
    fn load(&self) -> Result<(), LedgerError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    fn save(&self) -> Result<(), LedgerError> {
        let categories = self.categories.read().map_err(lock_error)?;

        let file_data = CategoryData {
            categories: Self::sorted(categories.values().cloned().collect()),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn get(&self, id: CategoryId) -> Result<Option<Category>, LedgerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Category>, LedgerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(Self::sorted(categories.values().cloned().collect()))
    }

    fn find_by_title(
        &self,
        title: &str,
        matching: CategoryMatching,
    ) -> Result<Option<Category>, LedgerError> {
        let categories = self.categories.read().map_err(lock_error)?;

        // Oldest first, so a store that already holds duplicates resolves stably
        let found = categories
            .values()
            .filter(|c| matching.matches(&c.title, title))
            .min_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            .cloned();
        Ok(found)
    }

    fn upsert_many(&self, new_categories: Vec<Category>) -> Result<(), LedgerError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        for category in new_categories {
            categories.insert(category.id, category);
        }
        Ok(())
    }

    fn count(&self) -> Result<usize, LedgerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.len())
    }
}
