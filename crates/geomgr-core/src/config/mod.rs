// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration items and utilities

mod format;
pub use format::{Error, Format};

/// Layout configuration
///
/// Passed to [`crate::layout::Manager::with_config`]. Builders constructed
/// with `new` take their spacing from the manager's config.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Inset applied on all four edges of a managed container
    pub default_border: i32,
    /// Spacing inserted automatically between items of box and grid layouts
    pub default_spacing: i32,
    /// Log a warning when a serial chain receives less than its minimum size
    pub warn_on_overflow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_border: 0,
            default_spacing: 5,
            warn_on_overflow: true,
        }
    }
}

impl Config {
    /// Construct, reading from environment variables
    ///
    /// The `GEOMGR_CONFIG` variable, if given, provides a path to a config
    /// file. The format is guessed from the file extension (see
    /// [`Format::guess_from_path`]).
    ///
    /// Default configuration is used if the variable is not set or if the file
    /// cannot be read (in which case a warning is logged).
    pub fn from_env() -> Self {
        Self::from_path_var(std::env::var_os("GEOMGR_CONFIG"))
    }

    fn from_path_var(path: Option<std::ffi::OsString>) -> Self {
        match path {
            Some(path) => Self::read_or_default(std::path::Path::new(&path)),
            None => Config::default(),
        }
    }

    #[cfg(feature = "serde")]
    fn read_or_default(path: &std::path::Path) -> Self {
        match Format::guess_and_read_path(path) {
            Ok(config) => config,
            Err(error) => {
                log::warn!(
                    "failed to read config from {}: {error}; using defaults",
                    path.display()
                );
                Config::default()
            }
        }
    }

    #[cfg(not(feature = "serde"))]
    fn read_or_default(path: &std::path::Path) -> Self {
        log::warn!(
            "ignoring config path {}: built without serde support",
            path.display()
        );
        Config::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.default_border, 0);
        assert_eq!(config.default_spacing, 5);
        assert!(config.warn_on_overflow);
    }

    #[test]
    fn missing_or_unreadable_path_gives_defaults() {
        init();
        assert_eq!(Config::from_path_var(None), Config::default());

        let missing = std::env::temp_dir().join("geomgr-no-such-dir/config.json");
        assert_eq!(Config::from_path_var(Some(missing.into())), Config::default());

        let name = format!("geomgr-config-dir-{}.json", std::process::id());
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let config = Config::from_path_var(Some(dir.clone().into()));
        let _ = std::fs::remove_dir(&dir);
        assert_eq!(config, Config::default());
    }

    #[cfg(feature = "json")]
    #[test]
    fn malformed_file_gives_defaults() {
        init();
        let path = std::env::temp_dir().join(format!("geomgr-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ default_border: ").unwrap();
        let config = Config::from_path_var(Some(path.clone().into()));
        let _ = std::fs::remove_file(&path);
        assert_eq!(config, Config::default());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_round_trip() {
        let path = std::env::temp_dir().join(format!("geomgr-config-{}.json", std::process::id()));
        let config = Config {
            default_border: 3,
            ..Config::default()
        };
        Format::guess_and_write_path(&path, &config).unwrap();
        let read: Config = Format::guess_and_read_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(read, config);
    }
}
