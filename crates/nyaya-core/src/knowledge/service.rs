//! Boundary adapter between raw caller input and the query filter.

use std::sync::Arc;

use serde::Deserialize;

use crate::shared::Language;

use super::filter::{self, QueryOptions};
use super::model::KnowledgeBase;
use super::store::KnowledgeStore;

/// Raw query parameters as delivered by the transport (URL query string).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub lang: Option<String>,
}

/// Stateless request/response adapter over the canonical snapshot. Cheap to
/// clone; all clones share the same read-only dataset.
#[derive(Debug, Clone)]
pub struct KnowledgeService {
    snapshot: Arc<KnowledgeBase>,
}

impl KnowledgeService {
    /// Wraps a loaded store. The store is injected at construction; the
    /// service itself performs no I/O.
    pub fn new(store: KnowledgeStore) -> Self {
        Self {
            snapshot: Arc::new(store.into_snapshot()),
        }
    }

    /// Normalizes raw parameters and returns the filtered snapshot.
    ///
    /// Degraded inputs are not errors: an unrecognized `lang` resolves to
    /// English, an unknown `category` yields an empty-categories result, and
    /// an empty or whitespace-only `q` means "no search filter". With no
    /// parameters at all the full snapshot is returned.
    pub fn query(&self, params: &KnowledgeParams) -> KnowledgeBase {
        let options = QueryOptions {
            category: params
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            term: params
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            language: Language::parse_or_default(params.lang.as_deref()),
        };
        filter::apply(&self.snapshot, &options)
    }

    /// The full, unfiltered snapshot.
    pub fn snapshot(&self) -> &KnowledgeBase {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> KnowledgeService {
        let raw = r#"{
            "categories": [
                {
                    "id": "const",
                    "name": "Constitutional Rights",
                    "nameHindi": "संवैधानिक अधिकार",
                    "description": "Fundamental rights",
                    "articles": [
                        {
                            "id": "a1",
                            "title": "Right to Equality",
                            "summary": "Article 14",
                            "keyPoints": ["equal protection"]
                        }
                    ]
                }
            ],
            "procedures": [
                {
                    "id": "p1",
                    "title": "File an RTI request",
                    "titleHindi": "RTI आवेदन दायर करें",
                    "steps": ["Draft application", "Pay fee"],
                    "stepsHindi": ["आवेदन का मसौदा तैयार करें", "शुल्क का भुगतान करें"]
                }
            ]
        }"#;
        KnowledgeService::new(KnowledgeStore::from_json(raw).unwrap())
    }

    #[test]
    fn no_parameters_returns_the_full_snapshot() {
        let service = service();
        let result = service.query(&KnowledgeParams::default());
        assert_eq!(&result, service.snapshot());
    }

    #[test]
    fn empty_and_whitespace_q_mean_no_search_filter() {
        let service = service();
        for q in ["", "   "] {
            let result = service.query(&KnowledgeParams {
                q: Some(q.to_string()),
                ..Default::default()
            });
            assert_eq!(&result, service.snapshot());
        }
    }

    #[test]
    fn unrecognized_lang_defaults_to_english() {
        let service = service();
        let result = service.query(&KnowledgeParams {
            q: Some("equality".to_string()),
            lang: Some("xx".to_string()),
            ..Default::default()
        });
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].articles[0].id, "a1");
    }

    #[test]
    fn unknown_category_is_soft_empty_not_an_error() {
        let service = service();
        let result = service.query(&KnowledgeParams {
            q: Some("equality".to_string()),
            category: Some("other".to_string()),
            ..Default::default()
        });
        assert!(result.categories.is_empty());
    }

    #[test]
    fn search_term_is_trimmed_before_matching() {
        let service = service();
        let result = service.query(&KnowledgeParams {
            q: Some("  equality  ".to_string()),
            ..Default::default()
        });
        assert_eq!(result.categories.len(), 1);
    }

    #[test]
    fn query_never_mutates_the_canonical_snapshot() {
        let service = service();
        let before = service.snapshot().clone();
        let _ = service.query(&KnowledgeParams {
            q: Some("equality".to_string()),
            category: Some("const".to_string()),
            lang: Some("hi".to_string()),
        });
        assert_eq!(service.snapshot(), &before);
    }
}
