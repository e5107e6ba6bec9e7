//! Pure filtering over knowledge snapshots.
//!
//! Filters compose in a fixed order: category narrowing first, then the
//! case-insensitive substring search within the narrowed set. Both steps
//! produce a fresh snapshot, preserve the original element order, and never
//! touch the source data.

use crate::shared::Language;

use super::model::{Article, Category, KnowledgeBase, Procedure};

/// Normalized filter inputs for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Keep only the category with this id. `None` keeps all categories.
    /// The category filter never touches procedures.
    pub category: Option<String>,
    /// Case-insensitive substring to search for. `None` keeps everything.
    pub term: Option<String>,
    /// Language whose text is inspected for matches. Returned records are
    /// always the full bilingual entities; only the include/exclude decision
    /// depends on the requested language.
    pub language: Language,
}

/// Narrows a snapshot according to the given options.
///
/// Pure and deterministic: identical `(snapshot, options)` always yield a
/// structurally identical result.
pub fn apply(base: &KnowledgeBase, options: &QueryOptions) -> KnowledgeBase {
    let mut categories: Vec<Category> = match &options.category {
        Some(id) => base
            .categories
            .iter()
            .filter(|category| category.id == *id)
            .cloned()
            .collect(),
        None => base.categories.clone(),
    };
    let mut procedures = base.procedures.clone();

    if let Some(term) = &options.term {
        let needle = term.to_lowercase();
        categories = categories
            .into_iter()
            .filter_map(|mut category| {
                category
                    .articles
                    .retain(|article| article_matches(article, &needle, options.language));
                // Categories with no surviving articles are dropped, not
                // returned as empty shells.
                if category.articles.is_empty() {
                    None
                } else {
                    Some(category)
                }
            })
            .collect();
        procedures.retain(|procedure| procedure_matches(procedure, &needle, options.language));
    }

    KnowledgeBase {
        categories,
        procedures,
    }
}

/// Case-insensitive containment. `needle` must already be lowercased.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// An article matches when the term occurs in its title, summary, or any key
/// point in the requested language. For Hindi, an absent Hindi field falls
/// back to the English text — a missing translation is never by itself a
/// non-match.
fn article_matches(article: &Article, needle: &str, language: Language) -> bool {
    match language {
        Language::En => {
            contains(&article.title, needle)
                || contains(&article.summary, needle)
                || article.key_points.iter().any(|p| contains(p, needle))
        }
        Language::Hi => {
            contains(article.title_hindi.as_deref().unwrap_or(&article.title), needle)
                || contains(
                    article.summary_hindi.as_deref().unwrap_or(&article.summary),
                    needle,
                )
                || article
                    .key_points_hindi
                    .as_deref()
                    .unwrap_or(&article.key_points)
                    .iter()
                    .any(|p| contains(p, needle))
        }
    }
}

/// A procedure matches when the term occurs in its title or any step in the
/// requested language. Procedure Hindi fields are mandatory, so no fallback
/// applies here: Hindi queries inspect Hindi text only.
fn procedure_matches(procedure: &Procedure, needle: &str, language: Language) -> bool {
    match language {
        Language::En => {
            contains(&procedure.title, needle)
                || procedure.steps.iter().any(|s| contains(s, needle))
        }
        Language::Hi => {
            contains(&procedure.title_hindi, needle)
                || procedure.steps_hindi.iter().any(|s| contains(s, needle))
        }
    }
}
