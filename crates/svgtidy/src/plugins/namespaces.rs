// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use super::prelude::*;

/// Removes the SVG namespace declaration, for inline SVG.
pub fn remove_xmlns(doc: &mut Document) {
    let svg = doc.root_element();
    if let Some(e) = doc.element_mut(svg) {
        e.remove_attribute("xmlns");
    }
}

pub fn remove_editors_ns_data(doc: &mut Document) {
    let mut prefixes = HashSet::new();
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            e.attributes.retain(|a| {
                let is_editor_ns = a
                    .name
                    .strip_prefix("xmlns:")
                    .map(|prefix| (prefix, is_one_of(&a.value, EDITOR_NAMESPACES)));
                match is_editor_ns {
                    Some((prefix, true)) => {
                        prefixes.insert(prefix.to_string());
                        false
                    }
                    _ => true,
                }
            });
        }
    }

    if prefixes.is_empty() {
        return;
    }

    let has_editor_prefix = |name: &str| match split_name(name).0 {
        Some(prefix) => prefixes.contains(prefix),
        None => false,
    };

    let count = doc.remove_all(|doc, id| {
        doc.element(id).map(|e| has_editor_prefix(&e.name)) == Some(true)
    });
    log::debug!("Removed {} editor element(s).", count);

    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            e.attributes.retain(|a| !has_editor_prefix(&a.name));
        }
    }
}

pub fn remove_unused_ns(doc: &mut Document) {
    let mut used = HashSet::new();
    for id in doc.elements() {
        if let Some(e) = doc.element(id) {
            if let Some(prefix) = e.prefix() {
                used.insert(prefix.to_string());
            }

            for attr in &e.attributes {
                if let (Some(prefix), _) = split_name(&attr.name) {
                    if prefix != "xmlns" {
                        used.insert(prefix.to_string());
                    }
                }
            }
        }
    }

    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            e.attributes.retain(|a| match a.name.strip_prefix("xmlns:") {
                Some(prefix) => used.contains(prefix),
                None => true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn editor_data() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' \
                  xmlns:sodipodi='http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd' \
                  sodipodi:docname='a.svg'><sodipodi:namedview/><rect/></svg>",
        )
        .unwrap();
        remove_editors_ns_data(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><rect/></svg>"
        );
    }

    #[test]
    fn unused_namespaces() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' \
                  xmlns:a='http://a.com'><rect a:x='1'/></svg>",
        )
        .unwrap();
        remove_unused_ns(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:a=\"http://a.com\"><rect a:x=\"1\"/></svg>"
        );
    }
}
