//! Environment variable and `.env` file support

use crate::error::{AppError, Result};

/// Helpers for reading harness settings from the environment
pub struct EnvManager;

impl EnvManager {
    /// Load a `.env` file from the working directory if one exists.
    ///
    /// A missing file is fine; a malformed one is a configuration error.
    pub fn load_env_file(debug: bool) -> Result<()> {
        match dotenv::dotenv() {
            Ok(path) => {
                if debug {
                    eprintln!("Loaded environment from {}", path.display());
                }
                Ok(())
            }
            Err(dotenv::Error::Io(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a non-empty string variable
    pub fn string_var(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Read and parse a variable, erroring on malformed values
    pub fn parsed_var<T>(name: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::string_var(name) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
                AppError::config(format!("invalid value for {}: '{}' ({})", name, raw, e))
            }),
        }
    }
}
