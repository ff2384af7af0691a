//! Environment variable parsing with fall-back defaults.
//!
//! Both daemons are configured entirely through the environment. A
//! missing or unparseable value never aborts startup: it falls back to
//! the documented default and leaves a `warn!` in the log so operators
//! can spot the typo.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Read a typed value from the environment, falling back to `default`
/// when the variable is unset or does not parse.
pub fn var_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(var = name, value = %raw, default = %default, "invalid value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Like [`var_or`], but additionally rejects values below `min`.
pub fn var_or_min<T>(name: &str, default: T, min: T) -> T
where
    T: FromStr + Display + PartialOrd + Copy,
{
    let value = var_or(name, default);
    if value < min {
        warn!(var = name, value = %value, min = %min, default = %default, "value below minimum, using default");
        default
    } else {
        value
    }
}

/// Read a string value, falling back to `default` when unset or empty.
pub fn string_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
