// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Component code generation.
//!
//! SVG is turned into a component for a UI framework. The root `svg` element
//! is always recreated with a fixed size, so only the `viewBox`
//! and the children are taken from the input.

use std::sync::OnceLock;

use regex::Regex;
use svgtidy::{Document, NodeId, WriteOptions};

use crate::Error;

mod flutter;
mod react;
mod react_native;
mod svelte;
mod vue;

/// A component name used when a file name cannot be converted.
pub const DEFAULT_COMPONENT_NAME: &str = "TinySVGDemo";

/// A `viewBox` used when SVG has none.
pub const DEFAULT_VIEW_BOX: &str = "0 0 24 24";

/// The size of a generated `svg` element.
pub const SVG_DIMENSIONS: &str = "1em";

/// A color that follows the text color.
pub const CURRENT_COLOR: &str = "currentColor";

const IGNORED_COLORS: &[&str] = &["none", "transparent"];
const URL_COLOR_PREFIX: &str = "url(";

/// A code generation target.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    #[allow(missing_docs)]
    ReactJsx,
    #[allow(missing_docs)]
    ReactTsx,
    #[allow(missing_docs)]
    Vue,
    #[allow(missing_docs)]
    Svelte,
    /// A `react-native-svg` component.
    ReactNative,
    /// A `flutter_svg` widget.
    Flutter,
}

impl Target {
    /// Returns all targets.
    pub fn all() -> &'static [Target] {
        &[
            Target::ReactJsx,
            Target::ReactTsx,
            Target::Vue,
            Target::Svelte,
            Target::ReactNative,
            Target::Flutter,
        ]
    }

    /// Returns a target name, as accepted by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            Target::ReactJsx => "react-jsx",
            Target::ReactTsx => "react-tsx",
            Target::Vue => "vue",
            Target::Svelte => "svelte",
            Target::ReactNative => "react-native",
            Target::Flutter => "flutter",
        }
    }

    /// Returns a file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Target::ReactJsx | Target::ReactNative => "jsx",
            Target::ReactTsx => "tsx",
            Target::Vue => "vue",
            Target::Svelte => "svelte",
            Target::Flutter => "dart",
        }
    }

    /// Returns a language name for syntax highlighting.
    pub fn language(&self) -> &'static str {
        match self {
            Target::ReactJsx | Target::ReactNative => "javascript",
            Target::ReactTsx => "typescript",
            Target::Vue | Target::Svelte => "html",
            Target::Flutter => "dart",
        }
    }
}

impl std::str::FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "react-jsx" | "jsx" => Ok(Target::ReactJsx),
            "react-tsx" | "tsx" => Ok(Target::ReactTsx),
            "vue" => Ok(Target::Vue),
            "svelte" => Ok(Target::Svelte),
            "react-native" => Ok(Target::ReactNative),
            "flutter" | "dart" => Ok(Target::Flutter),
            _ => Err(format!("unknown target '{}'", s)),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Creates a PascalCase component name from a file name.
///
/// Falls back to [`DEFAULT_COMPONENT_NAME`] when the result
/// is not a valid identifier.
pub fn component_name(file_name: Option<&str>) -> String {
    static EXTENSION: OnceLock<Regex> = OnceLock::new();
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    static VALID: OnceLock<Regex> = OnceLock::new();

    let file_name = match file_name {
        Some(s) if !s.is_empty() => s,
        _ => return DEFAULT_COMPONENT_NAME.to_string(),
    };

    // `unwrap` is safe, because patterns are valid.
    let extension = EXTENSION.get_or_init(|| Regex::new(r"(?i)\.svg$").unwrap());
    let separator = SEPARATOR.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]+(.)").unwrap());
    let valid = VALID.get_or_init(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

    let stem = extension.replace(file_name, "");
    let joined = separator.replace_all(&stem, |caps: &regex::Captures| caps[1].to_uppercase());

    let mut chars = joined.chars();
    let name = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    if valid.is_match(&name) {
        name
    } else {
        DEFAULT_COMPONENT_NAME.to_string()
    }
}

/// Colors used by `fill` and `stroke` attributes.
#[derive(Clone, PartialEq, Debug)]
pub struct ColorAnalysis {
    /// Unique trimmed colors in the document order.
    pub unique_colors: Vec<String>,
    /// Set when there is exactly one color.
    pub use_current_color: bool,
}

/// Collects `fill` and `stroke` colors.
///
/// `none`, `transparent` and paint server references are ignored.
/// Unparsable SVG has no colors.
pub fn analyze_colors(text: &str) -> ColorAnalysis {
    match Document::parse(text) {
        Ok(doc) => analyze_document(&doc),
        Err(_) => ColorAnalysis {
            unique_colors: Vec::new(),
            use_current_color: false,
        },
    }
}

fn analyze_document(doc: &Document) -> ColorAnalysis {
    let mut unique_colors: Vec<String> = Vec::new();
    for id in doc.elements() {
        for name in ["fill", "stroke"] {
            if let Some(color) = doc.attribute(id, name) {
                if !is_ignored_color(color) {
                    let color = color.trim();
                    if !unique_colors.iter().any(|c| c == color) {
                        unique_colors.push(color.to_string());
                    }
                }
            }
        }
    }

    ColorAnalysis {
        use_current_color: unique_colors.len() == 1,
        unique_colors,
    }
}

fn is_ignored_color(color: &str) -> bool {
    let color = color.trim().to_ascii_lowercase();
    color.is_empty() || IGNORED_COLORS.contains(&color.as_str()) || color.starts_with(URL_COLOR_PREFIX)
}

/// SVG prepared for code generation.
#[derive(Debug)]
pub struct Component {
    /// A component name.
    pub name: String,
    /// The root `viewBox` or [`DEFAULT_VIEW_BOX`].
    pub view_box: String,
    doc: Document,
}

impl Component {
    /// Returns the whole processed SVG.
    pub fn markup(&self) -> String {
        self.doc.to_string(&WriteOptions::default())
    }

    /// Returns the processed children of the root element.
    pub fn inner_markup(&self) -> String {
        self.doc.inner_markup(self.doc.root_element(), &WriteOptions::default())
    }

    pub(crate) fn rename_attributes(&mut self, map: &[(&str, &str)]) {
        for id in self.children_elements() {
            if let Some(e) = self.doc.element_mut(id) {
                for attr in &mut e.attributes {
                    if let Some((_, to)) = map.iter().find(|(from, _)| *from == attr.name) {
                        attr.name = to.to_string();
                    }
                }
            }
        }
    }

    /// Renames elements and returns the new names that were used.
    pub(crate) fn rename_elements(&mut self, map: &[(&str, &str)]) -> Vec<String> {
        let mut used = Vec::new();
        for id in self.children_elements() {
            let name = match self.doc.element(id) {
                Some(e) => e.name.clone(),
                None => continue,
            };

            if let Some((_, to)) = map.iter().find(|(from, _)| *from == name) {
                self.doc.rename(id, to);
                used.push(to.to_string());
            }
        }

        used.sort();
        used.dedup();
        used
    }

    fn children_elements(&self) -> Vec<NodeId> {
        let svg = self.doc.root_element();
        self.doc
            .descendants(svg)
            .into_iter()
            .filter(|id| *id != svg && self.doc.is_element(*id))
            .collect()
    }
}

/// Parses SVG and replaces a single color with [`CURRENT_COLOR`].
pub fn process_svg(text: &str, file_name: Option<&str>) -> Result<Component, Error> {
    let mut doc = Document::parse(text)?;

    let colors = analyze_document(&doc);
    if colors.use_current_color {
        let old_color = &colors.unique_colors[0];
        for id in doc.elements() {
            if let Some(e) = doc.element_mut(id) {
                for name in ["fill", "stroke"] {
                    if e.attribute(name).map(str::trim) == Some(old_color.as_str()) {
                        e.set_attribute(name, CURRENT_COLOR);
                    }
                }
            }
        }
    }

    let svg = doc.root_element();
    let view_box = doc
        .attribute(svg, "viewBox")
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_VIEW_BOX)
        .to_string();

    Ok(Component {
        name: component_name(file_name),
        view_box,
        doc,
    })
}

/// Generates component code.
pub fn generate(target: Target, text: &str, file_name: Option<&str>) -> Result<String, Error> {
    let mut component = process_svg(text, file_name)?;
    let code = match target {
        Target::ReactJsx => react::generate(&mut component, false),
        Target::ReactTsx => react::generate(&mut component, true),
        Target::Vue => vue::generate(&component),
        Target::Svelte => svelte::generate(&component),
        Target::ReactNative => react_native::generate(&mut component),
        Target::Flutter => flutter::generate(&component),
    };

    Ok(code)
}

/// Generates a file name for component code.
pub fn code_file_name(target: Target, file_name: Option<&str>) -> String {
    format!("{}.{}", component_name(file_name), target.extension())
}
