//! # degiroasync
//!
//! Unofficial asynchronous client for the DEGIRO web trading API.
//!
//! The crate is split in two layers:
//!
//! - [`webapi`]: one method per remote endpoint. Requests are built exactly as
//!   the web trader builds them and the decoded JSON body is returned untouched.
//! - [`application`]: typed services on top of the endpoint layer. Responses are
//!   validated field by field and mapped into the domain types found in
//!   [`presentation`].
//!
//! Sessions are plain values. [`application::client::Client::login`] returns a
//! [`application::auth::Session`] which the caller passes to every subsequent
//! call; the library keeps no session state of its own.
//!
//! ```ignore
//! use degiroasync::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let config = Config::new();
//!     let client = Client::new(config.clone())?;
//!     let session = client.login(&config.credentials).await?;
//!     let portfolio = client.get_portfolio(&session).await?;
//!     println!("{portfolio}");
//!     Ok(())
//! }
//! ```

/// Session establishment, configuration, services and the high-level client
pub mod application;
/// Remote endpoints, login status codes and defaults
pub mod constants;
/// Error types
pub mod error;
/// Transport, request parameters and response validation helpers
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Domain types returned by the high-level services
pub mod presentation;
/// Environment, logging and one-time password helpers
pub mod utils;
/// Low-level endpoint layer returning raw JSON
pub mod webapi;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
