// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration formats and read/write support

#[cfg(feature = "serde")]
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use thiserror::Error;

/// Configuration read/write/format errors
#[derive(Error, Debug)]
pub enum Error {
    #[cfg(feature = "yaml")]
    #[error("config deserialisation from YAML failed")]
    YamlDe(#[from] serde::de::value::Error),

    #[cfg(feature = "yaml")]
    #[error("config serialisation to YAML failed")]
    YamlSer(#[from] serde_yaml2::ser::Errors),

    #[cfg(feature = "json")]
    #[error("config (de)serialisation to JSON failed")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "ron")]
    #[error("config serialisation to RON failed")]
    Ron(#[from] ron::Error),

    #[cfg(feature = "ron")]
    #[error("config deserialisation from RON failed")]
    RonSpanned(#[from] ron::error::SpannedError),

    #[cfg(feature = "toml")]
    #[error("config deserialisation from TOML failed")]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("config serialisation to TOML failed")]
    TomlSer(#[from] toml::ser::Error),

    #[error("error reading / writing config file")]
    IoError(#[from] std::io::Error),

    #[error("format not supported: {0}")]
    UnsupportedFormat(Format),
}

/// Configuration serialisation formats
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Error)]
pub enum Format {
    /// Not specified: guess from the path
    #[default]
    #[error("no format")]
    None,

    /// JavaScript Object Notation
    #[error("JSON")]
    Json,

    /// Tom's Obvious Minimal Language
    #[error("TOML")]
    Toml,

    /// YAML Ain't Markup Language
    #[error("YAML")]
    Yaml,

    /// Rusty Object Notation
    #[error("RON")]
    Ron,

    /// Error: unable to guess format
    #[error("(unknown format)")]
    Unknown,
}

impl Format {
    /// Guess format from the path name
    ///
    /// This does not open the file. Unrecognised extensions yield
    /// [`Format::Unknown`].
    pub fn guess_from_path(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            Some("yaml") | Some("yml") => Format::Yaml,
            Some("ron") => Format::Ron,
            _ => Format::Unknown,
        }
    }

    /// Parse a value from `text`
    #[cfg(feature = "serde")]
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, Error> {
        match self {
            #[cfg(feature = "json")]
            Format::Json => Ok(serde_json::from_str(text)?),
            #[cfg(feature = "yaml")]
            Format::Yaml => Ok(serde_yaml2::from_str(text)?),
            #[cfg(feature = "ron")]
            Format::Ron => Ok(ron::from_str(text)?),
            #[cfg(feature = "toml")]
            Format::Toml => Ok(toml::from_str(text)?),
            _ => {
                let _ = text;
                Err(Error::UnsupportedFormat(self))
            }
        }
    }

    /// Serialise a value to text
    #[cfg(feature = "serde")]
    pub fn serialize<T: Serialize>(self, value: &T) -> Result<String, Error> {
        match self {
            #[cfg(feature = "json")]
            Format::Json => Ok(serde_json::to_string_pretty(value)?),
            #[cfg(feature = "yaml")]
            Format::Yaml => Ok(serde_yaml2::to_string(value)?),
            #[cfg(feature = "ron")]
            Format::Ron => Ok(ron::ser::to_string_pretty(
                value,
                ron::ser::PrettyConfig::default(),
            )?),
            #[cfg(feature = "toml")]
            Format::Toml => Ok(toml::to_string(value)?),
            _ => {
                let _ = value;
                Err(Error::UnsupportedFormat(self))
            }
        }
    }

    /// Read from a path
    #[cfg(feature = "serde")]
    pub fn read_path<T: DeserializeOwned>(self, path: &Path) -> Result<T, Error> {
        log::info!("read_path: path={}, format={:?}", path.display(), self);
        let text = std::fs::read_to_string(path)?;
        self.parse(&text)
    }

    /// Write to a path
    ///
    /// The whole document is serialised before the file is touched.
    #[cfg(feature = "serde")]
    pub fn write_path<T: Serialize>(self, path: &Path, value: &T) -> Result<(), Error> {
        log::info!("write_path: path={}, format={:?}", path.display(), self);
        let text = self.serialize(value)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Guess format and load from a path
    #[cfg(feature = "serde")]
    #[inline]
    pub fn guess_and_read_path<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
        Self::guess_from_path(path).read_path(path)
    }

    /// Guess format and write to a path
    #[cfg(feature = "serde")]
    #[inline]
    pub fn guess_and_write_path<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
        Self::guess_from_path(path).write_path(path, value)
    }
}
