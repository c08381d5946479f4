/// Environment variable helpers
pub mod config;
/// Tracing subscriber setup
pub mod logger;
/// One-time password derivation
pub mod otp;
