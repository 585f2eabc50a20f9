/*!
 * Decode command: print identity token claims without verification
 */

use anyhow::{bail, Result};
use colored::*;
use siwa_auth_methods::decode_claims;

pub fn decode_token(token: &str) -> Result<()> {
    let Some(claims) = decode_claims(token) else {
        bail!("token payload could not be decoded");
    };

    println!("{}", "=== Identity Token Claims ===".bold().cyan());
    println!("{}", "Signature NOT verified".yellow());

    println!("\n{}", "Payload:".bold());
    println!("{}", serde_json::to_string_pretty(&claims.payload)?);

    println!("\n{}", "Recognized claims:".bold());
    if let Some(sub) = &claims.sub {
        println!("  Apple user id: {}", sub);
    }
    if let Some(email) = &claims.email {
        println!("  Email (possibly relay): {}", email);
    }
    if let Some(expires_at) = claims.expires_at() {
        println!("  Expires at: {}", expires_at);
    }

    Ok(())
}
