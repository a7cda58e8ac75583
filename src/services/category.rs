//! Category service
//!
//! Resolves category titles to identifiers, creating categories on first use.
//! Titles are trimmed before lookup; comparison follows the configured
//! [`CategoryMatching`] policy.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::config::CategoryMatching;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    matching: CategoryMatching,
}

/// A category with the number of transactions that use it
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub transaction_count: usize,
}

/// Outcome of resolving a set of titles in one go
#[derive(Debug, Clone, Default)]
pub struct ResolvedCategories {
    by_key: HashMap<String, Category>,
    created: Vec<Category>,
    matching: CategoryMatching,
}

impl ResolvedCategories {
    /// Identifier for a title, if it was resolved
    pub fn id_for(&self, title: &str) -> Option<CategoryId> {
        self.by_key
            .get(&self.matching.key(title.trim()))
            .map(|c| c.id)
    }

    /// Categories that did not exist before this resolution
    pub fn created(&self) -> &[Category] {
        &self.created
    }

    /// Number of distinct titles that resolved to a category
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl<'a> CategoryService<'a> {
    /// Create a category service with exact title matching
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            matching: CategoryMatching::default(),
        }
    }

    /// Use a different title matching policy
    pub fn with_matching(mut self, matching: CategoryMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Trim and validate a title, producing the category it would create
    fn candidate(title: &str) -> LedgerResult<Category> {
        let category = Category::new(title.trim());
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        Ok(category)
    }

    /// Find a category by title
    pub fn find(&self, title: &str) -> LedgerResult<Option<Category>> {
        self.storage
            .categories
            .find_by_title(title.trim(), self.matching)
    }

    /// Return the id of the category with this title, creating it if needed
    ///
    /// Calling this twice with the same title yields the same id and stores
    /// a single category.
    pub fn resolve(&self, title: &str) -> LedgerResult<CategoryId> {
        let candidate = Self::candidate(title)?;

        if let Some(existing) = self.find(&candidate.title)? {
            debug!(title = %existing.title, id = %existing.id, "resolved existing category");
            return Ok(existing.id);
        }

        self.storage.categories.upsert(candidate.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            candidate.id.to_string(),
            Some(candidate.title.clone()),
            &candidate,
        )?;

        info!(title = %candidate.title, id = %candidate.id, "created category");
        Ok(candidate.id)
    }

    /// Resolve many titles at once
    ///
    /// Every distinct title is looked up first; only the ones that are still
    /// missing afterwards are created, in a single batch. Titles that cannot
    /// name a category (empty after trimming) are left unresolved.
    pub fn resolve_many<I, S>(&self, titles: I) -> LedgerResult<ResolvedCategories>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = ResolvedCategories {
            matching: self.matching,
            ..Default::default()
        };
        let mut missing: Vec<Category> = Vec::new();
        let mut seen = HashSet::new();

        for title in titles {
            let title = title.as_ref().trim();
            let key = self.matching.key(title);
            if !seen.insert(key.clone()) {
                continue;
            }

            let candidate = match Self::candidate(title) {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!(title, error = %e, "leaving category unresolved");
                    continue;
                }
            };

            match self.find(title)? {
                Some(existing) => {
                    resolved.by_key.insert(key, existing);
                }
                None => missing.push(candidate),
            }
        }

        if !missing.is_empty() {
            self.storage.categories.upsert_many(missing.clone())?;
            self.storage.categories.save()?;

            let entries: Vec<_> = missing
                .iter()
                .map(|c| {
                    AuditEntry::create(
                        EntityType::Category,
                        c.id.to_string(),
                        Some(c.title.clone()),
                        c,
                    )
                })
                .collect();
            self.storage.log_batch(&entries)?;

            info!(count = missing.len(), "created categories");
        }

        for category in missing {
            resolved
                .by_key
                .insert(self.matching.key(&category.title), category.clone());
            resolved.created.push(category);
        }

        Ok(resolved)
    }

    /// All categories, oldest first
    pub fn list(&self) -> LedgerResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// All categories with their usage counts
    pub fn list_with_counts(&self) -> LedgerResult<Vec<CategorySummary>> {
        self.list()?
            .into_iter()
            .map(|category| {
                let transaction_count =
                    self.storage.transactions.get_by_category(category.id)?.len();
                Ok(CategorySummary {
                    category,
                    transaction_count,
                })
            })
            .collect()
    }
}
