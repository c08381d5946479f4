/// Session values built by a login
pub mod auth;
/// High-level client
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Service implementations
pub mod services;
