// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A JSON configuration file.
//!
//! ```json
//! {
//!   "multipass": true,
//!   "floatPrecision": 3,
//!   "plugins": { "removeTitle": false, "removeDimensions": true },
//!   "exportScale": 4
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::session::{Session, SettingsUpdate};
use crate::Error;

/// User preferences. All fields are optional.
#[derive(Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Global settings overrides.
    #[serde(flatten)]
    pub settings: SettingsUpdate,

    /// Plugin states by plugin name.
    pub plugins: BTreeMap<String, bool>,

    /// A default raster export scale.
    pub export_scale: Option<f64>,

    /// A user interface language, like `de`.
    pub lang: Option<String>,
}

impl Config {
    /// Parses a config from a JSON string.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a config from a file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Loads a config from the default location.
    ///
    /// A missing file is not an error.
    pub fn load_default() -> Result<Self, Error> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Returns `tinysvg/config.json` inside the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tinysvg").join("config.json"))
    }

    /// Applies the config to a session.
    ///
    /// Fails on an unknown plugin name.
    pub fn apply(&self, session: &mut Session) -> Result<(), Error> {
        session.update_settings(self.settings);
        for (name, enabled) in &self.plugins {
            let plugin: svgtidy::Plugin = name.parse()?;
            session.plugins.set_enabled(plugin, *enabled);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let config = Config::parse(
            r#"{"floatPrecision": 3, "prettifyMarkup": false,
                "plugins": {"removeTitle": false}, "exportScale": 4}"#,
        )
        .unwrap();
        assert_eq!(config.settings.float_precision, Some(3));
        assert_eq!(config.settings.multipass, None);
        assert_eq!(config.export_scale, Some(4.0));

        let mut session = Session::new();
        config.apply(&mut session).unwrap();
        assert_eq!(session.settings.float_precision, 3);
        assert!(!session.settings.prettify_markup);
        assert!(!session.plugins.is_enabled(svgtidy::Plugin::RemoveTitle));
    }

    #[test]
    fn unknown_plugin() {
        let config = Config::parse(r#"{"plugins": {"removeEverything": true}}"#).unwrap();
        assert!(config.apply(&mut Session::new()).is_err());
    }

    #[test]
    fn empty() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }
}
