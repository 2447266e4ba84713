// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The optimization pipeline.
//!
//! Each plugin is a separate pass over a mutable [`Document`].
//! Plugins are always executed in the [`Plugin::all`] order,
//! no matter in which order they were enabled.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tree::Document;
use crate::writer::WriteOptions;
use crate::Error;

mod attrs_by_selector;
mod cleanup_attrs;
mod cleanup_ids;
mod collapse_groups;
mod convert_colors;
mod convert_shapes;
mod group_attrs;
mod inline_styles;
mod merge_paths;
mod namespaces;
mod numeric_values;
mod off_canvas;
mod path_data;
mod refs;
mod reuse_paths;
mod rm_elements;
mod rm_hidden;
mod rm_prolog;
mod rm_unknowns;
mod rm_useless_defs;
mod rm_useless_stroke_fill;
mod sort;
mod style_to_attrs;
mod styles;
mod svg_attrs;
mod transforms;

mod prelude {
    pub use crate::numbers::*;
    pub use crate::tree::*;
    pub use super::refs::*;
    pub use super::Options;
}

/// The maximum number of passes in the multipass mode.
pub const MAX_PASSES: usize = 10;

macro_rules! plugins {
    ($($variant:ident => $name:literal, $default:literal;)+) => {
        /// An optimization step.
        #[allow(missing_docs)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Plugin {
            $($variant,)+
        }

        impl Plugin {
            /// Returns all plugins in the execution order.
            pub fn all() -> &'static [Plugin] {
                &[$(Plugin::$variant,)+]
            }

            /// Returns a plugin name, like `removeComments`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Plugin::$variant => $name,)+
                }
            }

            /// Checks that the plugin is enabled by default.
            pub fn is_default(&self) -> bool {
                match self {
                    $(Plugin::$variant => $default,)+
                }
            }
        }

        impl FromStr for Plugin {
            type Err = UnknownPlugin;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Plugin::$variant),)+
                    _ => Err(UnknownPlugin(s.to_string())),
                }
            }
        }
    };
}

plugins! {
    RemoveDoctype => "removeDoctype", true;
    RemoveXmlProcInst => "removeXMLProcInst", true;
    RemoveComments => "removeComments", true;
    RemoveMetadata => "removeMetadata", true;
    RemoveXmlns => "removeXMLNS", false;
    RemoveEditorsNsData => "removeEditorsNSData", true;
    CleanupAttrs => "cleanupAttrs", true;
    MergeStyles => "mergeStyles", true;
    InlineStyles => "inlineStyles", true;
    MinifyStyles => "minifyStyles", true;
    ConvertStyleToAttrs => "convertStyleToAttrs", false;
    CleanupIds => "cleanupIds", true;
    RemoveRasterImages => "removeRasterImages", false;
    RemoveUselessDefs => "removeUselessDefs", true;
    CleanupNumericValues => "cleanupNumericValues", true;
    CleanupListOfValues => "cleanupListOfValues", false;
    ConvertColors => "convertColors", true;
    RemoveUnknownsAndDefaults => "removeUnknownsAndDefaults", true;
    RemoveNonInheritableGroupAttrs => "removeNonInheritableGroupAttrs", true;
    RemoveUselessStrokeAndFill => "removeUselessStrokeAndFill", true;
    RemoveViewBox => "removeViewBox", false;
    CleanupEnableBackground => "cleanupEnableBackground", true;
    RemoveHiddenElems => "removeHiddenElems", true;
    RemoveEmptyText => "removeEmptyText", true;
    ConvertShapeToPath => "convertShapeToPath", true;
    MoveElemsAttrsToGroup => "moveElemsAttrsToGroup", true;
    MoveGroupAttrsToElems => "moveGroupAttrsToElems", true;
    CollapseGroups => "collapseGroups", true;
    ConvertPathData => "convertPathData", true;
    ConvertEllipseToCircle => "convertEllipseToCircle", true;
    ConvertTransform => "convertTransform", true;
    RemoveEmptyAttrs => "removeEmptyAttrs", true;
    RemoveEmptyContainers => "removeEmptyContainers", true;
    MergePaths => "mergePaths", true;
    RemoveUnusedNs => "removeUnusedNS", true;
    ReusePaths => "reusePaths", false;
    SortAttrs => "sortAttrs", true;
    SortDefsChildren => "sortDefsChildren", true;
    RemoveTitle => "removeTitle", true;
    RemoveDesc => "removeDesc", true;
    RemoveDimensions => "removeDimensions", false;
    RemoveStyleElement => "removeStyleElement", false;
    RemoveScriptElement => "removeScriptElement", false;
    RemoveOffCanvasPaths => "removeOffCanvasPaths", false;
    RemoveAttributesBySelector => "removeAttributesBySelector", false;
}

impl Plugin {
    fn apply(&self, doc: &mut Document, opt: &Options) {
        match self {
            Plugin::RemoveDoctype => rm_prolog::remove_doctype(doc),
            Plugin::RemoveXmlProcInst => rm_prolog::remove_xml_proc_inst(doc),
            Plugin::RemoveComments => rm_prolog::remove_comments(doc),
            Plugin::RemoveMetadata => rm_elements::remove_elements(doc, &["metadata"]),
            Plugin::RemoveXmlns => namespaces::remove_xmlns(doc),
            Plugin::RemoveEditorsNsData => namespaces::remove_editors_ns_data(doc),
            Plugin::CleanupAttrs => cleanup_attrs::cleanup_attrs(doc),
            Plugin::MergeStyles => styles::merge_styles(doc),
            Plugin::InlineStyles => inline_styles::inline_styles(doc),
            Plugin::MinifyStyles => styles::minify_styles(doc),
            Plugin::ConvertStyleToAttrs => style_to_attrs::convert_style_to_attrs(doc),
            Plugin::CleanupIds => cleanup_ids::cleanup_ids(doc),
            Plugin::RemoveRasterImages => rm_elements::remove_raster_images(doc),
            Plugin::RemoveUselessDefs => rm_useless_defs::remove_useless_defs(doc),
            Plugin::CleanupNumericValues => numeric_values::cleanup_numeric_values(doc, opt),
            Plugin::CleanupListOfValues => numeric_values::cleanup_list_of_values(doc, opt),
            Plugin::ConvertColors => convert_colors::convert_colors(doc),
            Plugin::RemoveUnknownsAndDefaults => rm_unknowns::remove_unknowns_and_defaults(doc),
            Plugin::RemoveNonInheritableGroupAttrs => {
                group_attrs::remove_non_inheritable_group_attrs(doc)
            }
            Plugin::RemoveUselessStrokeAndFill => {
                rm_useless_stroke_fill::remove_useless_stroke_and_fill(doc)
            }
            Plugin::RemoveViewBox => svg_attrs::remove_view_box(doc),
            Plugin::CleanupEnableBackground => svg_attrs::cleanup_enable_background(doc),
            Plugin::RemoveHiddenElems => rm_hidden::remove_hidden_elems(doc),
            Plugin::RemoveEmptyText => rm_hidden::remove_empty_text(doc),
            Plugin::ConvertShapeToPath => convert_shapes::convert_shape_to_path(doc, opt),
            Plugin::MoveElemsAttrsToGroup => group_attrs::move_elems_attrs_to_group(doc),
            Plugin::MoveGroupAttrsToElems => group_attrs::move_group_attrs_to_elems(doc),
            Plugin::CollapseGroups => collapse_groups::collapse_groups(doc),
            Plugin::ConvertPathData => path_data::convert_path_data(doc, opt),
            Plugin::ConvertEllipseToCircle => convert_shapes::convert_ellipse_to_circle(doc),
            Plugin::ConvertTransform => transforms::convert_transform(doc, opt),
            Plugin::RemoveEmptyAttrs => cleanup_attrs::remove_empty_attrs(doc),
            Plugin::RemoveEmptyContainers => rm_hidden::remove_empty_containers(doc),
            Plugin::MergePaths => merge_paths::merge_paths(doc),
            Plugin::RemoveUnusedNs => namespaces::remove_unused_ns(doc),
            Plugin::ReusePaths => reuse_paths::reuse_paths(doc),
            Plugin::SortAttrs => sort::sort_attrs(doc),
            Plugin::SortDefsChildren => sort::sort_defs_children(doc),
            Plugin::RemoveTitle => rm_elements::remove_elements(doc, &["title"]),
            Plugin::RemoveDesc => rm_elements::remove_desc(doc),
            Plugin::RemoveDimensions => svg_attrs::remove_dimensions(doc),
            Plugin::RemoveStyleElement => rm_elements::remove_elements(doc, &["style"]),
            Plugin::RemoveScriptElement => rm_elements::remove_script_element(doc),
            Plugin::RemoveOffCanvasPaths => off_canvas::remove_off_canvas_paths(doc),
            Plugin::RemoveAttributesBySelector => {
                attrs_by_selector::remove_attributes_by_selector(doc, &opt.remove_attributes)
            }
        }
    }
}

impl std::fmt::Display for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<String> for Plugin {
    type Error = UnknownPlugin;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Plugin::from_str(&s)
    }
}

impl From<Plugin> for String {
    fn from(p: Plugin) -> Self {
        p.name().to_string()
    }
}

/// An unknown plugin name.
#[derive(Clone, PartialEq, Debug)]
pub struct UnknownPlugin(pub String);

impl std::fmt::Display for UnknownPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "unknown plugin '{}'", self.0)
    }
}

impl std::error::Error for UnknownPlugin {}

/// A plugin state.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct PluginConfig {
    /// A plugin.
    pub name: Plugin,
    /// Is the plugin enabled.
    pub enabled: bool,
}

/// A rule for the `removeAttributesBySelector` plugin.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AttributeSelector {
    /// A CSS selector.
    pub selector: String,
    /// Attributes to remove from matched elements.
    pub attributes: Vec<String>,
}

/// Optimization options.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Repeat the pipeline until the output stops shrinking.
    ///
    /// Default: true
    pub multipass: bool,

    /// Fractional digits kept in coordinates and lengths.
    ///
    /// Default: 2
    pub float_precision: u8,

    /// Fractional digits kept in transform matrices.
    ///
    /// Default: 4
    pub transform_precision: u8,

    /// Plugin states. Contains all plugins.
    pub plugins: Vec<PluginConfig>,

    /// Rules for the `removeAttributesBySelector` plugin.
    ///
    /// Default: empty
    pub remove_attributes: Vec<AttributeSelector>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            multipass: true,
            float_precision: 2,
            transform_precision: 4,
            plugins: default_plugins(),
            remove_attributes: Vec::new(),
        }
    }
}

impl Options {
    /// Checks that the plugin is enabled.
    pub fn is_enabled(&self, plugin: Plugin) -> bool {
        self.plugins
            .iter()
            .any(|p| p.name == plugin && p.enabled)
    }

    /// Enables or disables a plugin.
    pub fn set_enabled(&mut self, plugin: Plugin, enabled: bool) {
        match self.plugins.iter_mut().find(|p| p.name == plugin) {
            Some(p) => p.enabled = enabled,
            None => self.plugins.push(PluginConfig {
                name: plugin,
                enabled,
            }),
        }
    }

    /// Flips a plugin state by its name.
    pub fn toggle(&mut self, name: &str) -> Result<(), UnknownPlugin> {
        let plugin = Plugin::from_str(name)?;
        let enabled = self.is_enabled(plugin);
        self.set_enabled(plugin, !enabled);
        Ok(())
    }

    /// Restores the default plugin states.
    pub fn reset_plugins(&mut self) {
        self.plugins = default_plugins();
    }

    /// Returns enabled plugins in the execution order.
    pub fn enabled_plugins(&self) -> Vec<Plugin> {
        Plugin::all()
            .iter()
            .copied()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }
}

fn default_plugins() -> Vec<PluginConfig> {
    Plugin::all()
        .iter()
        .map(|p| PluginConfig {
            name: *p,
            enabled: p.is_default(),
        })
        .collect()
}

/// An optimization result.
#[derive(Clone, PartialEq, Debug)]
pub struct Output {
    /// Minified SVG.
    pub data: String,
    /// The number of executed passes.
    pub passes: usize,
}

/// Optimizes an SVG string.
pub fn optimize(text: &str, opt: &Options) -> Result<Output, Error> {
    let mut doc = Document::parse(text)?;
    let plugins = opt.enabled_plugins();
    let write_opt = WriteOptions::default();

    let max_passes = if opt.multipass { MAX_PASSES } else { 1 };
    let mut best: Option<String> = None;
    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        for plugin in &plugins {
            plugin.apply(&mut doc, opt);
        }

        let data = doc.to_string(&write_opt);
        log::debug!("Pass {}: {} bytes.", passes, data.len());

        match best {
            Some(ref prev) if data.len() >= prev.len() => break,
            _ => best = Some(data),
        }
    }

    Ok(Output {
        data: best.unwrap_or_default(),
        passes,
    })
}

/// Runs a single plugin over a document.
///
/// Mostly useful for testing.
pub fn apply_plugin(doc: &mut Document, plugin: Plugin, opt: &Options) {
    plugin.apply(doc, opt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        assert_eq!(Plugin::all().len(), 45);
        for p in Plugin::all() {
            assert_eq!(Plugin::from_str(p.name()), Ok(*p));
        }
    }

    #[test]
    fn view_box_is_kept_by_default() {
        let opt = Options::default();
        assert!(!opt.is_enabled(Plugin::RemoveViewBox));
        assert!(opt.is_enabled(Plugin::ConvertPathData));
    }

    #[test]
    fn toggle() {
        let mut opt = Options::default();
        opt.toggle("removeComments").unwrap();
        assert!(!opt.is_enabled(Plugin::RemoveComments));
        opt.toggle("removeComments").unwrap();
        assert!(opt.is_enabled(Plugin::RemoveComments));
        assert!(opt.toggle("noSuchPlugin").is_err());
    }

    #[test]
    fn options_from_json() {
        let opt: Options = serde_json::from_str(
            r#"{"multipass": false, "floatPrecision": 3,
                "plugins": [{"name": "removeTitle", "enabled": false}]}"#,
        )
        .unwrap();
        assert!(!opt.multipass);
        assert_eq!(opt.float_precision, 3);
        assert_eq!(opt.transform_precision, 4);
        assert_eq!(opt.enabled_plugins(), Vec::<Plugin>::new());
    }
}
