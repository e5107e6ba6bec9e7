//! nyaya-core: domain library for the bilingual legal-information assistant
//! (knowledge dataset, query filtering, user profiles, shared config and types).

mod knowledge;
mod profile;
mod shared;

// Knowledge base: static bilingual dataset, filter, query service
pub use knowledge::{
    filter, Article, Category, KnowledgeBase, KnowledgeError, KnowledgeParams, KnowledgeService,
    KnowledgeStore, Procedure, QueryOptions,
};

// User profiles (demo credential store)
pub use profile::{NewProfile, ProfileError, ProfileStore, ProfileUpdate, UserProfile};

// Shared (config, language tag, chat turns)
pub use shared::{AppConfig, ChatMessage, Language, Role};
