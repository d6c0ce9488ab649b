//! Password and session token hashing.
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 PHC strings
//! (`$pbkdf2-sha256$i=<rounds>,l=32$<salt>$<hash>`), so the round count
//! travels with every hash. Session tokens are opaque random strings handed
//! to the client once; only their SHA-256 digest is persisted.

use anyhow::{anyhow, Result};
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const PASSWORD_ROUNDS: u32 = 100_000;
const PASSWORD_HASH_LENGTH: usize = 32;

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let params = Params {
        rounds: PASSWORD_ROUNDS,
        output_length: PASSWORD_HASH_LENGTH,
    };
    let hash = Pbkdf2
        .hash_password_customized(password.as_bytes(), None, None, params, &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Malformed stored hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            tracing::warn!("Unreadable password hash: {}", e);
            false
        }
    }
}

/// Fresh 64 hex character bearer token.
pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
