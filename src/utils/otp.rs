//! Time-based one-time passwords (RFC 6238) used for two-factor login.

use crate::constants::{TOTP_DIGITS, TOTP_STEP_SECONDS};
use crate::error::AppError;
use chrono::Utc;
use totp_rs::{Algorithm, Secret, TOTP};

/// Derives the one-time password valid at `timestamp` (unix seconds)
///
/// The secret is the base32 string shown when two-factor authentication was
/// enabled. Spaces, `=` padding and lowercase letters are accepted.
pub fn generate_totp(secret: &str, timestamp: u64) -> Result<String, AppError> {
    let totp = build_totp(secret)?;
    Ok(totp.generate(timestamp))
}

/// Derives the one-time password valid now
pub fn current_totp(secret: &str) -> Result<String, AppError> {
    let now = u64::try_from(Utc::now().timestamp())
        .map_err(|_| AppError::InvalidInput("system clock is before 1970".to_string()))?;
    generate_totp(secret, now)
}

/// Index of the 30 second window containing `timestamp`
#[must_use]
pub fn totp_window(timestamp: u64) -> u64 {
    timestamp / TOTP_STEP_SECONDS
}

fn build_totp(secret: &str) -> Result<TOTP, AppError> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return Err(AppError::InvalidSecret("secret is empty".to_string()));
    }

    let bytes = Secret::Encoded(normalized)
        .to_bytes()
        .map_err(|e| AppError::InvalidSecret(format!("{e:?}")))?;

    // Secrets issued by the broker can be shorter than the 128 bits totp-rs
    // enforces by default.
    Ok(TOTP::new_unchecked(
        Algorithm::SHA1,
        TOTP_DIGITS,
        1,
        TOTP_STEP_SECONDS,
        bytes,
    ))
}
