//! Reading configuration overrides from environment variables.

use std::{env, str::FromStr};

pub(crate) const ENV_THREADS: &str = "CHOOSEPRIO_THREADS";
pub(crate) const ENV_QUANTUM_MS: &str = "CHOOSEPRIO_QUANTUM_MS";
pub(crate) const ENV_PROGRESS_EVERY: &str = "CHOOSEPRIO_PROGRESS_EVERY";
pub(crate) const ENV_HIGH_RES_TIMER: &str = "CHOOSEPRIO_HIGH_RES_TIMER";

/// Parses `raw` as a `T`, logging and discarding values that don't parse.
pub(crate) fn parse_var<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a valid value");
            None
        }
    }
}

/// Returns the value of environment variable `name` parsed as a `T`, if set and valid.
pub(crate) fn var<T: FromStr>(name: &str) -> Option<T> {
    parse_var(name, env::var(name).ok())
}

/// Interprets `0`, `false`, `off` and `no` as `false` and any other value as `true`.
pub(crate) fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
