// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

// Presentation attributes and their initial values.
const DEFAULT_VALUES: &[(&str, &str)] = &[
    ("clip-rule", "nonzero"),
    ("display", "inline"),
    ("fill", "#000"),
    ("fill-opacity", "1"),
    ("fill-rule", "nonzero"),
    ("font-stretch", "normal"),
    ("font-style", "normal"),
    ("font-variant", "normal"),
    ("font-weight", "normal"),
    ("opacity", "1"),
    ("stroke", "none"),
    ("stroke-dasharray", "none"),
    ("stroke-dashoffset", "0"),
    ("stroke-linecap", "butt"),
    ("stroke-linejoin", "miter"),
    ("stroke-miterlimit", "4"),
    ("stroke-opacity", "1"),
    ("stroke-width", "1"),
    ("text-anchor", "start"),
    ("visibility", "visible"),
];

// Geometry attributes that default to zero.
const ZERO_DEFAULTS: &[(&str, &[&str])] = &[
    ("circle", &["cx", "cy"]),
    ("ellipse", &["cx", "cy"]),
    ("image", &["x", "y"]),
    ("line", &["x1", "y1", "x2", "y2"]),
    ("rect", &["x", "y"]),
    ("svg", &["x", "y"]),
    ("use", &["x", "y"]),
];

/// Removes unknown elements and attributes with default values.
pub fn remove_unknowns_and_defaults(doc: &mut Document) {
    let count = doc.remove_all(|doc, id| {
        let e = match doc.element(id) {
            Some(e) => e,
            None => return false,
        };

        if e.prefix().is_some() || is_one_of(&e.name, KNOWN_ELEMENTS) {
            return false;
        }

        // Anything goes inside `foreignObject`.
        !doc.ancestors(id).skip(1).any(|a| doc.is_tag(a, "foreignObject"))
    });

    if count != 0 {
        log::debug!("Removed {} unknown element(s).", count);
    }

    // Inherited values can be overridden by CSS we do not resolve.
    let check_inherited = !has_style_sheet(doc);

    for id in doc.elements() {
        let is_inside_foreign = doc.ancestors(id).skip(1).any(|a| doc.is_tag(a, "foreignObject"));
        if is_inside_foreign {
            continue;
        }

        let mut remove = Vec::new();
        {
            let e = match doc.element(id) {
                Some(e) => e,
                None => continue,
            };

            for attr in &e.attributes {
                if is_default_geometry(&e.name, &attr.name, &attr.value) {
                    remove.push(attr.name.clone());
                    continue;
                }

                let default = match DEFAULT_VALUES.iter().find(|(n, _)| *n == attr.name) {
                    Some((_, v)) => *v,
                    None => continue,
                };

                if attr.value.trim() != default {
                    continue;
                }

                if is_inheritable_attribute(&attr.name) {
                    if !check_inherited {
                        continue;
                    }

                    // Removing the attribute would expose a non-default parent value.
                    let parent_value = doc
                        .ancestors(id)
                        .skip(1)
                        .find_map(|a| doc.attribute(a, &attr.name));
                    if parent_value.map(|v| v.trim() != default) == Some(true) {
                        continue;
                    }
                }

                remove.push(attr.name.clone());
            }
        }

        if let Some(e) = doc.element_mut(id) {
            for name in remove {
                e.remove_attribute(&name);
            }
        }
    }
}

fn is_default_geometry(element: &str, name: &str, value: &str) -> bool {
    let is_zero = matches!(value.trim(), "0" | "0px" | "0.0");
    is_zero
        && ZERO_DEFAULTS
            .iter()
            .any(|(e, attrs)| *e == element && attrs.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn defaults() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><g stroke-width='2'>\
             <rect x='0' stroke-width='1' opacity='1'/></g><path fill-rule='nonzero'/>\
             <unknown/><foreignObject><div/></foreignObject></svg>",
        )
        .unwrap();
        remove_unknowns_and_defaults(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g stroke-width=\"2\">\
             <rect stroke-width=\"1\"/></g><path/><foreignObject><div/></foreignObject></svg>"
        );
    }
}
