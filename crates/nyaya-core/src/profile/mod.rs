//! Local user profile store (demo credential store).
//!
//! Server-side analog of the original client-side session persistence:
//! profiles live in a local sled keyspace and logins are plain string
//! matches with no server-side verification. Real authentication is an
//! explicit non-goal; the redesign is recorded in DESIGN.md.

mod store;

pub use store::{NewProfile, ProfileError, ProfileStore, ProfileUpdate, UserProfile};
