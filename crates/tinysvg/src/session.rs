// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SVG working state.

use serde::{Deserialize, Serialize};
use svgtidy::{Document, UnknownPlugin, WriteOptions};

use crate::data_uri::{compression_rate, gzip_size};
use crate::diff::{diff_lines, unified_diff, DiffLine};
use crate::dimensions::{thumbnail, THUMBNAIL_SIZE};
use crate::history::NewEntry;
use crate::Error;

/// Settings shared by all plugins.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// Show the original markup instead of the optimized one.
    ///
    /// Default: false
    pub show_original: bool,

    /// Also report gzipped sizes.
    ///
    /// Default: false
    pub compare_gzipped: bool,

    /// Indent markup for display.
    ///
    /// Default: true
    pub prettify_markup: bool,

    /// Default: true
    pub multipass: bool,

    /// Default: 2
    pub float_precision: u8,

    /// Default: 4
    pub transform_precision: u8,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            show_original: false,
            compare_gzipped: false,
            prettify_markup: true,
            multipass: true,
            float_precision: 2,
            transform_precision: 4,
        }
    }
}

/// A partial [`GlobalSettings`] update. Unset fields are kept.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub show_original: Option<bool>,
    pub compare_gzipped: Option<bool>,
    pub prettify_markup: Option<bool>,
    pub multipass: Option<bool>,
    pub float_precision: Option<u8>,
    pub transform_precision: Option<u8>,
}

impl GlobalSettings {
    fn merge(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.show_original {
            self.show_original = v;
        }
        if let Some(v) = update.compare_gzipped {
            self.compare_gzipped = v;
        }
        if let Some(v) = update.prettify_markup {
            self.prettify_markup = v;
        }
        if let Some(v) = update.multipass {
            self.multipass = v;
        }
        if let Some(v) = update.float_precision {
            self.float_precision = v;
        }
        if let Some(v) = update.transform_precision {
            self.transform_precision = v;
        }
    }
}

/// Which markup to show.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Markup {
    #[allow(missing_docs)]
    Original,
    #[allow(missing_docs)]
    Compressed,
}

/// Size statistics.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stats {
    /// Size in bytes.
    pub original_size: usize,
    /// Size in bytes.
    pub compressed_size: usize,
    /// Saved percentage.
    pub compression_rate: f64,
    /// Gzipped sizes, when `compare_gzipped` is set.
    pub gzipped: Option<(usize, usize)>,
}

/// The current SVG, its optimized version and optimization settings.
#[derive(Clone, Default, Debug)]
pub struct Session {
    /// Original markup.
    pub original: String,
    /// Optimized markup. Empty until [`Session::optimize`] is called.
    pub compressed: String,
    #[allow(missing_docs)]
    pub file_name: String,
    /// Plugin states.
    pub plugins: svgtidy::Options,
    #[allow(missing_docs)]
    pub settings: GlobalSettings,
}

impl Session {
    /// Creates an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the original SVG and forgets the optimized one.
    pub fn set_original(&mut self, svg: String, file_name: String) {
        self.original = svg;
        self.file_name = file_name;
        self.compressed.clear();
    }

    /// Replaces the original SVG with a transformed one.
    ///
    /// The optimized SVG is outdated and gets cleared.
    pub fn apply_transformation(&mut self, svg: String) {
        self.original = svg;
        self.compressed.clear();
    }

    /// Flips a plugin state.
    pub fn toggle_plugin(&mut self, name: &str) -> Result<(), UnknownPlugin> {
        self.plugins.toggle(name)
    }

    /// Merges settings.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.merge(update);
    }

    /// Restores the default plugin states.
    pub fn reset_plugins(&mut self) {
        self.plugins.reset_plugins();
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    /// Returns optimization options built from plugin states and settings.
    pub fn options(&self) -> svgtidy::Options {
        svgtidy::Options {
            multipass: self.settings.multipass,
            float_precision: self.settings.float_precision,
            transform_precision: self.settings.transform_precision,
            ..self.plugins.clone()
        }
    }

    /// Optimizes the original SVG and returns the number of passes.
    pub fn optimize(&mut self) -> Result<usize, Error> {
        let output = svgtidy::optimize(&self.original, &self.options())?;
        self.compressed = output.data;
        Ok(output.passes)
    }

    /// Returns size statistics.
    pub fn stats(&self) -> Stats {
        let gzipped = if self.settings.compare_gzipped {
            Some((gzip_size(&self.original), gzip_size(&self.compressed)))
        } else {
            None
        };

        Stats {
            original_size: self.original.len(),
            compressed_size: self.compressed.len(),
            compression_rate: compression_rate(&self.original, &self.compressed),
            gzipped,
        }
    }

    /// Returns markup for display.
    ///
    /// The markup is indented when `prettify_markup` is set and it can be parsed.
    pub fn prettified(&self, which: Markup) -> String {
        let text = match which {
            Markup::Original => &self.original,
            Markup::Compressed => &self.compressed,
        };

        if !self.settings.prettify_markup {
            return text.clone();
        }

        prettify(text)
    }

    /// Compares the indented original and optimized markup line by line.
    ///
    /// Markup is indented even when `prettify_markup` is off,
    /// because minified markup is a single line.
    pub fn diff(&self) -> Vec<DiffLine> {
        diff_lines(&prettify(&self.original), &prettify(&self.compressed))
    }

    /// Renders [`Session::diff`] as a unified diff.
    pub fn unified_diff(&self, context: usize) -> String {
        unified_diff(&prettify(&self.original), &prettify(&self.compressed), context)
    }

    /// Returns the markup selected by `show_original`.
    pub fn displayed(&self) -> String {
        if self.settings.show_original || self.compressed.is_empty() {
            self.prettified(Markup::Original)
        } else {
            self.prettified(Markup::Compressed)
        }
    }

    /// Creates a history entry for the current result.
    ///
    /// Returns `None` until both the original and the optimized SVG are set.
    pub fn history_entry(&self) -> Option<NewEntry> {
        if self.original.is_empty() || self.compressed.is_empty() {
            return None;
        }

        Some(NewEntry {
            file_name: self.file_name.clone(),
            original_svg: self.original.clone(),
            compressed_svg: self.compressed.clone(),
            thumbnail: thumbnail(&self.compressed, THUMBNAIL_SIZE),
            config: self.options(),
            original_size: self.original.len(),
            compressed_size: self.compressed.len(),
        })
    }
}

fn prettify(text: &str) -> String {
    match Document::parse(text) {
        Ok(doc) => doc.to_string(&WriteOptions::pretty()),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg'><!-- c --><g><rect width='10' height='10'/></g></svg>";

    #[test]
    fn original_clears_compressed() {
        let mut s = Session::new();
        s.set_original(SVG.to_string(), "a.svg".to_string());
        s.optimize().unwrap();
        assert!(!s.compressed.is_empty());

        s.apply_transformation(SVG.to_string());
        assert!(s.compressed.is_empty());
        assert_eq!(s.file_name, "a.svg");
    }

    #[test]
    fn settings_are_merged() {
        let mut s = Session::new();
        s.update_settings(SettingsUpdate {
            float_precision: Some(3),
            ..SettingsUpdate::default()
        });
        assert_eq!(s.settings.float_precision, 3);
        assert!(s.settings.multipass);
        assert_eq!(s.options().float_precision, 3);
    }

    #[test]
    fn plugins() {
        let mut s = Session::new();
        s.toggle_plugin("removeComments").unwrap();
        assert!(!s.options().is_enabled(svgtidy::Plugin::RemoveComments));
        s.reset_plugins();
        assert!(s.options().is_enabled(svgtidy::Plugin::RemoveComments));
        assert!(s.toggle_plugin("unknown").is_err());
    }

    #[test]
    fn stats() {
        let mut s = Session::new();
        s.set_original(SVG.to_string(), "a.svg".to_string());
        s.optimize().unwrap();

        let stats = s.stats();
        assert_eq!(stats.original_size, SVG.len());
        assert!(stats.compression_rate > 0.0);
        assert_eq!(stats.gzipped, None);

        s.settings.compare_gzipped = true;
        assert!(s.stats().gzipped.is_some());
    }

    #[test]
    fn prettify() {
        let mut s = Session::new();
        s.set_original("<svg xmlns='http://www.w3.org/2000/svg'><g/></svg>".to_string(), String::new());
        assert_eq!(
            s.prettified(Markup::Original),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <g/>\n</svg>"
        );

        s.settings.prettify_markup = false;
        assert_eq!(s.displayed(), s.original);
    }

    #[test]
    fn diff() {
        let mut s = Session::new();
        s.set_original(SVG.to_string(), "a.svg".to_string());
        s.settings.prettify_markup = false;
        s.optimize().unwrap();

        let lines = s.diff();
        assert_eq!(
            lines[0],
            DiffLine::Unchanged {
                old_line: 1,
                new_line: 1,
                text: "<svg xmlns=\"http://www.w3.org/2000/svg\">".to_string(),
            }
        );
        assert!(lines.len() > 2);
        assert!(lines.iter().any(|l| !matches!(l, DiffLine::Unchanged { .. })));
        assert!(s.unified_diff(3).starts_with("--- original\n+++ optimized\n@@ "));
    }

    #[test]
    fn history_entry() {
        let mut s = Session::new();
        assert!(s.history_entry().is_none());
        s.set_original(SVG.to_string(), "a.svg".to_string());
        s.optimize().unwrap();

        let entry = s.history_entry().unwrap();
        assert_eq!(entry.file_name, "a.svg");
        assert_eq!(entry.compressed_size, s.compressed.len());
        assert!(entry.thumbnail.starts_with("data:image/svg+xml;base64,"));
    }
}
