//! Data model for the bilingual legal knowledge dataset.
//!
//! Field names serialize in camelCase to match the JSON asset and the UI
//! payloads (`titleHindi`, `keyPoints`, ...). Hindi fields on articles are
//! optional — readers fall back to the English text when a Hindi field is
//! absent. Procedures carry both languages unconditionally.

use serde::{Deserialize, Serialize};

/// A single legal article (e.g. one constitutional right) within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Identifier, unique within the owning category.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_hindi: Option<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_hindi: Option<String>,
    pub key_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points_hindi: Option<Vec<String>>,
}

/// A thematic grouping of articles (constitutional rights, consumer law, ...).
/// Owns its articles; an article has no existence outside its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier, unique across the dataset.
    pub id: String,
    pub name: String,
    pub name_hindi: String,
    pub description: String,
    /// Non-empty in the loaded dataset. Filtering drops categories whose
    /// article list would become empty instead of returning empty shells.
    pub articles: Vec<Article>,
}

/// A step-by-step legal procedure (filing an FIR, an RTI request, ...).
/// Top-level, independent of categories; always fully bilingual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    /// Identifier, unique across the dataset.
    pub id: String,
    pub title: String,
    pub title_hindi: String,
    pub steps: Vec<String>,
    pub steps_hindi: Vec<String>,
}

/// The whole dataset or a filtered view of it — same shape in both cases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub categories: Vec<Category>,
    pub procedures: Vec<Procedure>,
}

impl KnowledgeBase {
    /// Total number of articles across all categories.
    pub fn article_count(&self) -> usize {
        self.categories.iter().map(|c| c.articles.len()).sum()
    }
}
