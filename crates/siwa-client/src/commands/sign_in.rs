/*!
 * Sign-in command using the local development provider
 */

use anyhow::Result;
use colored::*;
use siwa_auth_methods::development::LocalProfile;
use siwa_auth_methods::{LocalIdentityProvider, SignInService};
use siwa_identity_core::UpsertOutcome;
use std::sync::Arc;

use super::open_identity_core;
use crate::config::ClientConfig;

pub async fn sign_in(config: &ClientConfig, profile: LocalProfile) -> Result<()> {
    println!("{}", "=== Sign in with Apple ===".bold().cyan());
    println!("  Container: {}", config.container);
    println!(
        "  {}",
        "Local provider: identity tokens are unsigned".yellow()
    );

    let identity_core = open_identity_core(config)?;
    let provider = Arc::new(LocalIdentityProvider::new(profile, config.client_id.clone()));
    let service = SignInService::new(provider, identity_core, config.sign_in.clone());

    let outcome = service.sign_in().await?;

    println!("\n{}", "Result:".bold());
    println!("  Apple user id: {}", outcome.provider_user_id);
    match outcome.upsert {
        UpsertOutcome::Created => println!("  {}", "Record saved successfully".green()),
        UpsertOutcome::AlreadyExists => println!("  {}", "Data already exists".yellow()),
    }

    println!("\n{}", "Backend payload:".bold());
    println!("{}", serde_json::to_string_pretty(&outcome.payload)?);

    Ok(())
}
