/*!
 * Users command
 */

use anyhow::Result;
use colored::*;
use siwa_identity_core::IdentityCore;

use super::open_identity_core;
use crate::config::ClientConfig;

pub async fn list_users(config: &ClientConfig) -> Result<()> {
    let identity_core = open_identity_core(config)?;
    let users = identity_core.list_users().await?;

    println!(
        "{}",
        format!("=== Users in {} ===", config.container).bold().cyan()
    );

    if users.is_empty() {
        println!("\n{}", "No users found".yellow());
        return Ok(());
    }

    for user in users {
        println!("\n{}", user.record_name.bold());
        println!("  Display Name: {}", user.display_name);
        println!("  Email Relay: {}", user.email_relay);
        println!("  Created At: {}", user.created_at);
    }

    Ok(())
}
