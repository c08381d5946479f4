// Tests against the live web trader. They only run when
// DEGIROASYNC_INTEGRATION=1 and credentials are set in the environment:
// DEGIRO_USERNAME, DEGIRO_PASSWORD and, for accounts with two-factor
// authentication, DEGIRO_TOTP_SECRET.
mod common;
mod portfolio_tests;
