//! # siwa-identity-core
//!
//! Persisted identity for users who signed in with Apple.
//!
//! Each provider user id maps to exactly one [`UserRecord`], stored under
//! the key `user_<provider_user_id>`. A record is created on the first
//! successful sign-in and is never updated or deleted afterwards; later
//! sign-ins observe [`UpsertOutcome::AlreadyExists`].

#![warn(clippy::all)]

pub mod errors;
pub mod service;
pub mod traits;
pub mod types;

pub use errors::{IdentityCoreError, Result};
pub use service::CredentialUpsertService;
pub use traits::IdentityCore;
pub use types::*;
