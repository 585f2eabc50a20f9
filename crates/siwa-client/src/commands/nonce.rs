/*!
 * Nonce command
 */

use anyhow::{bail, Result};
use colored::*;
use siwa_crypto::{generate_nonce, sha256_hex};

pub fn print_nonce(length: usize) -> Result<()> {
    if length == 0 {
        bail!("nonce length must be greater than zero");
    }

    let nonce = generate_nonce(length)?;

    println!("{}", "=== Nonce ===".bold().cyan());
    println!("  Raw nonce:     {}", nonce);
    println!("  SHA-256 (hex): {}", sha256_hex(&nonce).green());
    println!(
        "\n{}",
        "Send the digest with the authorization request; keep the raw nonce for the backend."
            .dimmed()
    );

    Ok(())
}
