//! Bilingual legal knowledge base: static dataset, pure filtering, query service.
//!
//! The dataset is loaded and validated once at startup and shared read-only
//! for the process lifetime. Every query produces a fresh filtered snapshot
//! with the same shape as the full dataset; the canonical data is never
//! mutated, so any number of requests can filter concurrently without
//! coordination.

pub mod filter;
mod model;
mod service;
mod store;

pub use filter::QueryOptions;
pub use model::{Article, Category, KnowledgeBase, Procedure};
pub use service::{KnowledgeParams, KnowledgeService};
pub use store::{KnowledgeError, KnowledgeStore};
