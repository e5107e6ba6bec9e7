//! Sled-backed profile store with an email index tree.

use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use uuid::Uuid;

use crate::shared::Language;

/// Tree holding `profile id -> StoredProfile` (JSON).
const TREE_PROFILES: &str = "profiles";
/// Tree holding `lowercased email -> profile id`.
const TREE_BY_EMAIL: &str = "profiles_by_email";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile store unavailable: {0}")]
    Storage(#[from] sled::Error),
    #[error("profile record corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("email already registered")]
    EmailTaken,
    #[error("profile not found")]
    NotFound,
}

/// Public profile record returned to callers. `created_at` is Unix millis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub language: Language,
    pub created_at: i64,
}

/// Stored record: the profile plus its password. The password never leaves
/// this module and is compared as a plain string (demo store, no hashing).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProfile {
    #[serde(flatten)]
    profile: UserProfile,
    password: String,
}

/// Signup input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub language: Language,
}

/// Partial profile update (display name and/or preferred language).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub language: Option<Language>,
}

/// Local profile keyspace. One sled `Db`, two trees: records by id and an
/// email index for signup/login lookups.
pub struct ProfileStore {
    db: Db,
}

impl ProfileStore {
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    /// Seeds the demo accounts when the store is empty. Returns true if
    /// anything was inserted.
    pub fn seed_demo_profiles(&self) -> Result<bool, ProfileError> {
        let profiles = self.db.open_tree(TREE_PROFILES)?;
        if !profiles.is_empty() {
            return Ok(false);
        }
        for (name, email, language) in [
            ("राज कुमार", "demo@legal.com", Language::Hi),
            ("John Doe", "john@legal.com", Language::En),
        ] {
            let profile = self.signup(NewProfile {
                name: name.to_string(),
                email: email.to_string(),
                password: "123456".to_string(),
                language,
            })?;
            tracing::debug!(target: "nyaya::profile", email = %profile.email, "Demo profile created");
        }
        Ok(true)
    }

    /// Creates a profile. Fails with `EmailTaken` when the email (case- and
    /// whitespace-insensitive) is already registered.
    pub fn signup(&self, input: NewProfile) -> Result<UserProfile, ProfileError> {
        let profiles = self.db.open_tree(TREE_PROFILES)?;
        let by_email = self.db.open_tree(TREE_BY_EMAIL)?;

        let email_key = email_key(&input.email);
        if by_email.contains_key(email_key.as_bytes())? {
            return Err(ProfileError::EmailTaken);
        }

        let record = StoredProfile {
            profile: UserProfile {
                id: Uuid::new_v4().to_string(),
                name: input.name,
                email: input.email,
                language: input.language,
                created_at: now_ms(),
            },
            password: input.password,
        };
        profiles.insert(record.profile.id.as_bytes(), serde_json::to_vec(&record)?)?;
        by_email.insert(email_key.as_bytes(), record.profile.id.as_bytes())?;
        Ok(record.profile)
    }

    /// Looks up a profile by email and compares the password as a plain
    /// string. `None` covers both unknown email and wrong password.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<UserProfile>, ProfileError> {
        let by_email = self.db.open_tree(TREE_BY_EMAIL)?;
        let Some(id) = by_email.get(email_key(email).as_bytes())? else {
            return Ok(None);
        };
        let id = String::from_utf8_lossy(&id).into_owned();
        let Some(record) = self.get_stored(&id)? else {
            return Ok(None);
        };
        if record.password == password {
            Ok(Some(record.profile))
        } else {
            Ok(None)
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<UserProfile>, ProfileError> {
        Ok(self.get_stored(id)?.map(|record| record.profile))
    }

    /// Applies a partial update and returns the new profile. Fails with
    /// `NotFound` for unknown ids.
    pub fn update(&self, id: &str, updates: &ProfileUpdate) -> Result<UserProfile, ProfileError> {
        let profiles = self.db.open_tree(TREE_PROFILES)?;
        let mut record = self.get_stored(id)?.ok_or(ProfileError::NotFound)?;
        if let Some(name) = &updates.name {
            record.profile.name = name.clone();
        }
        if let Some(language) = updates.language {
            record.profile.language = language;
        }
        profiles.insert(id.as_bytes(), serde_json::to_vec(&record)?)?;
        Ok(record.profile)
    }

    fn get_stored(&self, id: &str) -> Result<Option<StoredProfile>, ProfileError> {
        let profiles = self.db.open_tree(TREE_PROFILES)?;
        match profiles.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
