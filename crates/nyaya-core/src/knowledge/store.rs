//! Loader and validator for the canonical knowledge dataset.

use std::collections::HashSet;
use std::path::Path;

use super::model::KnowledgeBase;

/// Errors raised while loading the canonical dataset. All are fatal to the
/// query service; there is no partially-loaded state and no retry.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge dataset: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse knowledge dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid knowledge dataset: {0}")]
    Invalid(String),
}

/// Holds the canonical bilingual dataset, validated at construction.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    snapshot: KnowledgeBase,
}

impl KnowledgeStore {
    /// Loads and validates the dataset from a JSON file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses and validates a dataset from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, KnowledgeError> {
        let snapshot: KnowledgeBase = serde_json::from_str(raw)?;
        Self::from_snapshot(snapshot)
    }

    /// Validates and wraps an already-built dataset.
    pub fn from_snapshot(snapshot: KnowledgeBase) -> Result<Self, KnowledgeError> {
        validate(&snapshot)?;
        Ok(Self { snapshot })
    }

    /// The canonical snapshot. Read-only; filtering clones what survives.
    pub fn snapshot(&self) -> &KnowledgeBase {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> KnowledgeBase {
        self.snapshot
    }
}

/// Structural invariants: unique category/procedure ids across the dataset,
/// unique article ids within each category, required arrays non-empty.
fn validate(base: &KnowledgeBase) -> Result<(), KnowledgeError> {
    let mut category_ids = HashSet::new();
    for category in &base.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(KnowledgeError::Invalid(format!(
                "duplicate category id '{}'",
                category.id
            )));
        }
        if category.articles.is_empty() {
            return Err(KnowledgeError::Invalid(format!(
                "category '{}' has no articles",
                category.id
            )));
        }
        let mut article_ids = HashSet::new();
        for article in &category.articles {
            if !article_ids.insert(article.id.as_str()) {
                return Err(KnowledgeError::Invalid(format!(
                    "duplicate article id '{}' in category '{}'",
                    article.id, category.id
                )));
            }
            if article.key_points.is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "article '{}' has no key points",
                    article.id
                )));
            }
        }
    }

    let mut procedure_ids = HashSet::new();
    for procedure in &base.procedures {
        if !procedure_ids.insert(procedure.id.as_str()) {
            return Err(KnowledgeError::Invalid(format!(
                "duplicate procedure id '{}'",
                procedure.id
            )));
        }
        if procedure.steps.is_empty() || procedure.steps_hindi.is_empty() {
            return Err(KnowledgeError::Invalid(format!(
                "procedure '{}' has an empty step list",
                procedure.id
            )));
        }
    }

    Ok(())
}
