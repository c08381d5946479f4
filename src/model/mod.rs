/// Login payloads
pub mod auth;
/// HTTP transport
pub mod http;
/// Typed request parameters
pub mod requests;
/// URL and attribute list helpers
pub mod utils;
/// Field level validation of JSON responses
pub mod validation;
