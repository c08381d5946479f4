use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// Reads and parses an environment variable, falling back to `default`
///
/// A variable that is present but cannot be parsed is logged and replaced by
/// the default.
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|e| {
            error!("Failed to parse {}: {:?}, using default", env_var, e);
            default
        }),
        Err(_) => default,
    }
}

/// Reads and parses an environment variable, `None` when absent, blank or invalid
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    let val = env::var(env_var).ok()?;
    let val = val.trim();
    if val.is_empty() {
        return None;
    }
    val.parse::<T>().ok()
}

/// Reads a boolean switch such as `DEGIROASYNC_INTEGRATION=1`
///
/// `1`, `true`, `yes` and `on` (any case) enable the switch, anything else
/// including an unset variable disables it.
#[must_use]
pub fn get_env_flag(env_var: &str) -> bool {
    env::var(env_var)
        .map(|val| {
            matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}
