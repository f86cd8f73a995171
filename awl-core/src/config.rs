//! Address configuration file.
//!
//! ```json
//! { "config": { "StrasseNummer": "123", "StrasseName": null, "HausNummer": "39" } }
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::de::optional_string_or_number;

/// File name looked up next to the executable when no path is given.
pub const DEFAULT_FILE_NAME: &str = "awl.conf";

#[derive(thiserror::Error, Debug)]
/// Fatal errors while reading the configuration file.
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("Error reading configuration file {} - {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file is not valid JSON or lacks the `config` object.
    #[error("Error reading configuration file {} - {source}", path.display())]
    Json {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The location of the running executable is unknown.
    #[error("Cannot locate the default configuration file: {0}")]
    Location(#[source] io::Error),
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(deserialize_with = "Option::deserialize")]
    config: Option<RawConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(
        rename = "StrasseNummer",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    street_code: Option<String>,
    #[serde(
        rename = "StrasseName",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    street_name: Option<String>,
    #[serde(
        rename = "HausNummer",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    house_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How the configured street is identified.
pub enum StreetRef<'config> {
    /// Street code, usable for schedule requests as is.
    Code(&'config str),
    /// Street name that still has to be looked up in the directory.
    Name(&'config str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StreetId {
    Code { code: String, name: Option<String> },
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated address configuration.
///
/// Holds a house number and at least one of street code and street name.
pub struct Config {
    street: StreetId,
    house_number: String,
}

impl Config {
    /// Build a configuration, or `None` when a required field is missing.
    #[must_use]
    pub fn new(
        street_code: Option<String>,
        street_name: Option<String>,
        house_number: Option<String>,
    ) -> Option<Self> {
        let raw = RawConfig {
            street_code: street_code.filter(|code| !code.trim().is_empty()),
            street_name: street_name.filter(|name| !name.trim().is_empty()),
            house_number: house_number.filter(|number| !number.trim().is_empty()),
        };
        validate(raw)
    }

    /// Configured street code, if any.
    #[must_use]
    pub fn street_code(&self) -> Option<&str> {
        match &self.street {
            StreetId::Code { code, .. } => Some(code),
            StreetId::Name(_) => None,
        }
    }

    /// Configured street name, if any.
    #[must_use]
    pub fn street_name(&self) -> Option<&str> {
        match &self.street {
            StreetId::Code { name, .. } => name.as_deref(),
            StreetId::Name(name) => Some(name),
        }
    }

    /// Configured house number.
    #[must_use]
    pub fn house_number(&self) -> &str {
        &self.house_number
    }

    /// The street reference to use; a code wins over a name.
    #[must_use]
    pub fn street(&self) -> StreetRef<'_> {
        match &self.street {
            StreetId::Code { code, .. } => StreetRef::Code(code),
            StreetId::Name(name) => StreetRef::Name(name),
        }
    }
}

/// Default configuration path: [`DEFAULT_FILE_NAME`] next to the executable.
///
/// # Errors
///
/// Returns [`ConfigError::Location`] when the executable path is unavailable.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(ConfigError::Location)?;
    let dir = exe.parent().map_or_else(PathBuf::new, Path::to_path_buf);
    Ok(dir.join(DEFAULT_FILE_NAME))
}

/// Load the configuration from `path`, or from [`default_path`].
///
/// Returns `Ok(None)` when the file parses but lacks the house number or
/// both street identifiers.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the file is missing, unreadable, not JSON,
/// or has no `config` key.
pub fn load(path: Option<&Path>) -> Result<Option<Config>, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };
    tracing::debug!(path = %path.display(), "reading configuration");

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    parse(&text).map_err(|source| ConfigError::Json { path, source })
}

fn parse(text: &str) -> Result<Option<Config>, serde_json::Error> {
    let file = serde_json::from_str::<ConfigFile>(text)?;
    Ok(validate(file.config.unwrap_or_default()))
}

fn validate(raw: RawConfig) -> Option<Config> {
    let street = match (raw.street_code, raw.street_name) {
        (Some(code), name) => Some(StreetId::Code { code, name }),
        (None, Some(name)) => Some(StreetId::Name(name)),
        (None, None) => {
            tracing::warn!("configuration has neither StrasseNummer nor StrasseName");
            None
        }
    };
    if raw.house_number.is_none() {
        tracing::warn!("configuration has no HausNummer");
    }

    Some(Config {
        street: street?,
        house_number: raw.house_number?,
    })
}
