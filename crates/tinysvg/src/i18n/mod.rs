// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dictionary-based translations.
//!
//! Dictionaries are embedded into the binary and parsed on first use.
//! A missing translation falls back to English and then to the key itself.

use std::collections::HashMap;
use std::sync::OnceLock;

// key -> locale -> text
type Dictionary = HashMap<String, HashMap<String, String>>;

/// A user interface language.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Locale {
    #[default]
    #[allow(missing_docs)]
    En,
    #[allow(missing_docs)]
    Zh,
    #[allow(missing_docs)]
    Ko,
    #[allow(missing_docs)]
    De,
}

impl Locale {
    /// Returns all supported locales.
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Zh, Locale::Ko, Locale::De]
    }

    /// Returns a language code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
            Locale::Ko => "ko",
            Locale::De => "de",
        }
    }

    /// Detects a locale from the `LC_ALL`, `LC_MESSAGES` and `LANG` variables.
    pub fn from_env() -> Option<Self> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| value.parse().ok())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    /// Parses a language tag, like `de`, `de-DE` or `zh_CN.UTF-8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(|c| c == '-' || c == '_' || c == '.')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match language.as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            "ko" => Ok(Locale::Ko),
            "de" => Ok(Locale::De),
            _ => Err(format!("unsupported language '{}'", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn plugins() -> &'static Dictionary {
    static DICT: OnceLock<Dictionary> = OnceLock::new();
    DICT.get_or_init(|| load(include_str!("plugins.json")))
}

fn messages() -> &'static Dictionary {
    static DICT: OnceLock<Dictionary> = OnceLock::new();
    DICT.get_or_init(|| load(include_str!("messages.json")))
}

fn load(data: &str) -> Dictionary {
    match serde_json::from_str(data) {
        Ok(dict) => dict,
        Err(e) => {
            log::warn!("Failed to parse a dictionary cause {}.", e);
            Dictionary::new()
        }
    }
}

fn lookup<'a>(dict: &'a Dictionary, key: &'a str, locale: Locale) -> &'a str {
    let entry = match dict.get(key) {
        Some(entry) => entry,
        None => return key,
    };

    entry
        .get(locale.code())
        .or_else(|| entry.get(Locale::En.code()))
        .map(String::as_str)
        .unwrap_or(key)
}

/// Returns a plugin label, like `Remove comments`.
pub fn plugin_label(name: &str, locale: Locale) -> &str {
    lookup(plugins(), name, locale)
}

/// Returns a user interface message.
pub fn message(key: &str, locale: Locale) -> &str {
    lookup(messages(), key, locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locales() {
        assert_eq!("de-DE".parse::<Locale>(), Ok(Locale::De));
        assert_eq!("zh_CN.UTF-8".parse::<Locale>(), Ok(Locale::Zh));
        assert_eq!("KO".parse::<Locale>(), Ok(Locale::Ko));
        assert!("fr".parse::<Locale>().is_err());
        assert!("C".parse::<Locale>().is_err());
    }

    #[test]
    fn plugin_labels() {
        assert_eq!(plugin_label("removeComments", Locale::En), "Remove comments");
        assert_eq!(plugin_label("removeComments", Locale::De), "Kommentare entfernen");
        assert_eq!(plugin_label("unknownPlugin", Locale::Zh), "unknownPlugin");
    }

    #[test]
    fn all_plugins_are_translated() {
        for plugin in svgtidy::Plugin::all() {
            for locale in Locale::all() {
                let entry = plugins().get(plugin.name()).unwrap();
                assert!(entry.contains_key(locale.code()), "{} {}", plugin.name(), locale);
            }
        }
    }

    #[test]
    fn messages_are_translated() {
        for entry in messages().values() {
            for locale in Locale::all() {
                assert!(entry.contains_key(locale.code()));
            }
        }
        assert_eq!(message("original", Locale::Ko), "원본");
        assert_eq!(message("noSuchKey", Locale::De), "noSuchKey");
    }
}
