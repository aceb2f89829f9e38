//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get a comma separated environment variable and parse every item.
///
/// Empty items are skipped, so `"1, 4,"` parses as `[1, 4]`.
pub fn get_env_list<T: FromStr>(name: &'static str) -> Result<Vec<T>, Error> {
    let val = get_env(name)?;
    val.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<T>().map_err(|_| Error::WrongFormat(name)))
        .collect()
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl Error {
    /// True when the variable is simply absent (callers usually fall back to a default).
    pub fn is_missing(&self) -> bool {
        matches!(self, Error::MissingEnv(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        let err = get_env("LIB_UTILS_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn test_get_env_list_parses_items() {
        env::set_var("LIB_UTILS_TEST_CHAIN_LIST", "1, 4,,42");
        let ids: Vec<u64> = get_env_list("LIB_UTILS_TEST_CHAIN_LIST").unwrap();
        assert_eq!(ids, vec![1, 4, 42]);
    }

    #[test]
    fn test_get_env_list_wrong_format() {
        env::set_var("LIB_UTILS_TEST_BAD_LIST", "1,mainnet");
        let res: Result<Vec<u64>, _> = get_env_list("LIB_UTILS_TEST_BAD_LIST");
        assert_eq!(res, Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_LIST")));
    }
}
