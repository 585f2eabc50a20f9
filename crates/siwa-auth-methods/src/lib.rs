//! # siwa-auth-methods
//!
//! The Sign in with Apple handshake.
//!
//! One attempt runs as:
//!
//! 1. [`SignInService::begin`] generates a nonce and builds an
//!    [`AuthorizationRequest`] carrying its SHA-256 digest and a fresh state
//! 2. the [`IdentityProvider`] authorizes the user and returns an
//!    [`AppleIdCredential`], or an error if the user cancels
//! 3. [`SignInService::complete`] inspects the identity token claims and
//!    upserts the user record through the identity core
//!
//! # Security Note
//!
//! Identity token claims are decoded **without signature verification**.
//! They are logged and used to pick the stored email, nothing more. Treating
//! them as proof of identity requires verifying the token against Apple's
//! published keys first, which this crate does not do.

#![warn(clippy::all)]

pub mod config;
pub mod development;
pub mod errors;
pub mod service;
pub mod token;
pub mod traits;
pub mod types;

pub use config::SignInConfig;
pub use development::LocalIdentityProvider;
pub use errors::{AuthMethodsError, ProviderError, Result};
pub use service::{AuthAttempt, SignInService};
pub use token::{decode_claims, decode_payload, TokenClaims};
pub use traits::IdentityProvider;
pub use types::*;
