// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Element and attribute groups used by plugins.

/// Elements that can contain graphics and other containers.
pub const CONTAINER_ELEMENTS: &[&str] = &[
    "a", "defs", "foreignObject", "g", "glyph", "marker", "mask", "missing-glyph", "pattern",
    "svg", "switch", "symbol",
];

/// Basic shapes and paths.
pub const SHAPE_ELEMENTS: &[&str] = &[
    "circle", "ellipse", "line", "path", "polygon", "polyline", "rect",
];

/// Elements that render something on their own.
pub const GRAPHIC_ELEMENTS: &[&str] = &[
    "circle", "ellipse", "image", "line", "path", "polygon", "polyline", "rect", "text", "use",
];

/// Elements that are never rendered directly and are referenced by id.
pub const REFERENCED_ELEMENTS: &[&str] = &[
    "clipPath", "filter", "linearGradient", "marker", "mask", "pattern", "radialGradient",
    "symbol",
];

/// Known SVG 1.1/2 element names.
pub const KNOWN_ELEMENTS: &[&str] = &[
    "a", "animate", "animateColor", "animateMotion", "animateTransform", "circle", "clipPath",
    "color-profile", "cursor", "defs", "desc", "discard", "ellipse", "feBlend",
    "feColorMatrix", "feComponentTransfer", "feComposite", "feConvolveMatrix",
    "feDiffuseLighting", "feDisplacementMap", "feDistantLight", "feDropShadow", "feFlood",
    "feFuncA", "feFuncB", "feFuncG", "feFuncR", "feGaussianBlur", "feImage", "feMerge",
    "feMergeNode", "feMorphology", "feOffset", "fePointLight", "feSpecularLighting",
    "feSpotLight", "feTile", "feTurbulence", "filter", "font", "font-face",
    "font-face-format", "font-face-name", "font-face-src", "font-face-uri", "foreignObject",
    "g", "glyph", "glyphRef", "hatch", "hatchpath", "hkern", "image", "line",
    "linearGradient", "marker", "mask", "mesh", "meshgradient", "meshpatch", "meshrow",
    "metadata", "missing-glyph", "mpath", "path", "pattern", "polygon", "polyline",
    "radialGradient", "rect", "script", "set", "solidcolor", "stop", "style", "svg", "switch",
    "symbol", "text", "textPath", "title", "tref", "tspan", "use", "view", "vkern",
];

/// Presentation attributes, i.e. the ones that can also be set via CSS.
pub const PRESENTATION_ATTRIBUTES: &[&str] = &[
    "alignment-baseline", "baseline-shift", "clip", "clip-path", "clip-rule", "color",
    "color-interpolation", "color-interpolation-filters", "color-profile", "color-rendering",
    "cursor", "direction", "display", "dominant-baseline", "enable-background", "fill",
    "fill-opacity", "fill-rule", "filter", "flood-color", "flood-opacity", "font",
    "font-family", "font-size", "font-size-adjust", "font-stretch", "font-style",
    "font-variant", "font-weight", "glyph-orientation-horizontal",
    "glyph-orientation-vertical", "image-rendering", "isolation", "kerning", "letter-spacing",
    "lighting-color", "marker", "marker-end", "marker-mid", "marker-start", "mask",
    "mix-blend-mode", "opacity", "overflow", "paint-order", "pointer-events",
    "shape-rendering", "stop-color", "stop-opacity", "stroke", "stroke-dasharray",
    "stroke-dashoffset", "stroke-linecap", "stroke-linejoin", "stroke-miterlimit",
    "stroke-opacity", "stroke-width", "text-anchor", "text-decoration", "text-overflow",
    "text-rendering", "transform", "transform-origin", "unicode-bidi", "vector-effect",
    "visibility", "white-space", "word-spacing", "writing-mode",
];

/// Presentation attributes that are inherited by children.
pub const INHERITABLE_ATTRIBUTES: &[&str] = &[
    "clip-rule", "color", "color-interpolation", "color-interpolation-filters",
    "color-profile", "color-rendering", "cursor", "direction", "dominant-baseline", "fill",
    "fill-opacity", "fill-rule", "font", "font-family", "font-size", "font-size-adjust",
    "font-stretch", "font-style", "font-variant", "font-weight",
    "glyph-orientation-horizontal", "glyph-orientation-vertical", "image-rendering",
    "kerning", "letter-spacing", "marker", "marker-end", "marker-mid", "marker-start",
    "paint-order", "pointer-events", "shape-rendering", "stroke", "stroke-dasharray",
    "stroke-dashoffset", "stroke-linecap", "stroke-linejoin", "stroke-miterlimit",
    "stroke-opacity", "stroke-width", "text-anchor", "text-rendering", "visibility",
    "white-space", "word-spacing", "writing-mode",
];

/// Non-inheritable presentation attributes that still make sense on a group.
pub const GROUP_ONLY_ATTRIBUTES: &[&str] = &[
    "clip-path", "display", "filter", "mask", "opacity", "text-decoration", "transform",
    "unicode-bidi", "isolation", "mix-blend-mode", "transform-origin",
];

/// Attributes that may contain an id reference.
pub const REFERENCES_PROPS: &[&str] = &[
    "clip-path", "color-profile", "fill", "filter", "marker-end", "marker-mid",
    "marker-start", "mask", "stroke", "style",
];

/// Namespaces used by vector editors to store their own data.
pub const EDITOR_NAMESPACES: &[&str] = &[
    "http://creativecommons.org/ns#",
    "http://inkscape.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://ns.adobe.com/AdobeIllustrator/10.0/",
    "http://ns.adobe.com/AdobeSVGViewerExtensions/3.0/",
    "http://ns.adobe.com/Extensibility/1.0/",
    "http://ns.adobe.com/Flows/1.0/",
    "http://ns.adobe.com/GenericCustomNamespace/1.0/",
    "http://ns.adobe.com/Graphs/1.0/",
    "http://ns.adobe.com/ImageReplacement/1.0/",
    "http://ns.adobe.com/SaveForWeb/1.0/",
    "http://ns.adobe.com/Variables/1.0/",
    "http://ns.adobe.com/XPath/1.0/",
    "http://purl.org/dc/elements/1.1/",
    "http://schemas.microsoft.com/visio/2003/SVGExtensions/",
    "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://taptrix.com/vectorillustrator/svg_extensions",
    "http://www.bohemiancoding.com/sketch/ns",
    "http://www.figma.com/figma/ns",
    "http://www.inkscape.org/namespaces/inkscape",
    "http://www.serif.com/",
    "http://www.vector.evaxdesign.sk",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
];

/// Checks that the name is in the list.
#[inline]
pub fn is_one_of(name: &str, list: &[&str]) -> bool {
    list.contains(&name)
}

/// Checks that the attribute is a presentation one.
#[inline]
pub fn is_presentation_attribute(name: &str) -> bool {
    is_one_of(name, PRESENTATION_ATTRIBUTES)
}

/// Checks that the attribute is inheritable.
#[inline]
pub fn is_inheritable_attribute(name: &str) -> bool {
    is_one_of(name, INHERITABLE_ATTRIBUTES)
}

/// Checks that the element is a container.
#[inline]
pub fn is_container_element(name: &str) -> bool {
    is_one_of(name, CONTAINER_ELEMENTS)
}

/// Checks that the element is a shape.
#[inline]
pub fn is_shape_element(name: &str) -> bool {
    is_one_of(name, SHAPE_ELEMENTS)
}

/// Checks that the attribute is an event handler, like `onclick`.
#[inline]
pub fn is_event_attribute(name: &str) -> bool {
    name.len() > 2 && name.starts_with("on") && name[2..].bytes().all(|c| c.is_ascii_lowercase())
}
