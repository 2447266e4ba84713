// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

const PATH_ELEMENTS: &[&str] = &["g", "glyph", "missing-glyph", "path", "text"];

/// Removes presentation attributes that have no effect on a group.
pub fn remove_non_inheritable_group_attrs(doc: &mut Document) {
    for id in doc.elements() {
        if !doc.is_tag(id, "g") {
            continue;
        }

        if let Some(e) = doc.element_mut(id) {
            e.attributes.retain(|a| {
                !is_presentation_attribute(&a.name)
                    || is_inheritable_attribute(&a.name)
                    || is_one_of(&a.name, GROUP_ONLY_ATTRIBUTES)
            });
        }
    }
}

/// Moves inheritable attributes shared by all group children to the group.
pub fn move_elems_attrs_to_group(doc: &mut Document) {
    // Selectors can target children directly.
    if has_style_sheet(doc) {
        return;
    }

    // Bottom-up, so nested groups can pass attributes further.
    let mut groups: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|id| doc.is_tag(*id, "g"))
        .collect();
    groups.reverse();

    for g in groups {
        let children = doc.children(g).to_vec();
        if children.len() < 2 || children.iter().any(|c| !doc.is_element(*c)) {
            continue;
        }

        let first = match doc.element(children[0]) {
            Some(e) => e.clone(),
            None => continue,
        };

        let common: Vec<Attribute> = first
            .attributes
            .iter()
            .filter(|a| is_inheritable_attribute(&a.name))
            .filter(|a| {
                children[1..]
                    .iter()
                    .all(|c| doc.attribute(*c, &a.name) == Some(a.value.as_str()))
            })
            .cloned()
            .collect();

        if common.is_empty() {
            continue;
        }

        for attr in &common {
            for child in &children {
                if let Some(e) = doc.element_mut(*child) {
                    e.remove_attribute(&attr.name);
                }
            }

            if let Some(e) = doc.element_mut(g) {
                e.set_attribute(&attr.name, attr.value.clone());
            }
        }
    }
}

/// Moves a group transform to its children.
pub fn move_group_attrs_to_elems(doc: &mut Document) {
    for g in doc.elements() {
        if !doc.is_tag(g, "g") {
            continue;
        }

        let e = match doc.element(g) {
            Some(e) => e,
            None => continue,
        };

        let transform = match e.attribute("transform") {
            Some(v) => v.to_string(),
            None => continue,
        };

        // A transform changes how referenced clip paths and masks are positioned.
        let has_url = e
            .attributes
            .iter()
            .any(|a| is_one_of(&a.name, REFERENCES_PROPS) && !url_references(&a.value).is_empty());
        if has_url {
            continue;
        }

        let children = doc.children(g).to_vec();
        let all_paths = !children.is_empty()
            && children.iter().all(|c| {
                doc.element(*c)
                    .map(|e| is_one_of(&e.name, PATH_ELEMENTS) && !e.has_attribute("id"))
                    == Some(true)
            });
        if !all_paths {
            continue;
        }

        for child in children {
            if let Some(e) = doc.element_mut(child) {
                let value = match e.attribute("transform") {
                    Some(ts) => format!("{} {}", transform, ts),
                    None => transform.clone(),
                };
                e.set_attribute("transform", value);
            }
        }

        if let Some(e) = doc.element_mut(g) {
            e.remove_attribute("transform");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    fn run(text: &str, f: fn(&mut Document)) -> String {
        let mut doc = Document::parse(text).unwrap();
        f(&mut doc);
        doc.to_string(&WriteOptions::default())
    }

    #[test]
    fn non_inheritable() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg'><g fill='red' stop-color='red' opacity='.5'/></svg>",
                remove_non_inheritable_group_attrs
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g fill=\"red\" opacity=\".5\"/></svg>"
        );
    }

    #[test]
    fn shared_attributes() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg'><g><path fill='red' d='M0 0'/>\
                 <path fill='red' stroke='blue'/></g></svg>",
                move_elems_attrs_to_group
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g fill=\"red\"><path d=\"M0 0\"/>\
             <path stroke=\"blue\"/></g></svg>"
        );
    }

    #[test]
    fn group_transform() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg'><g transform='scale(2)'>\
                 <path transform='rotate(45)'/><path/></g></svg>",
                move_group_attrs_to_elems
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g><path transform=\"scale(2) rotate(45)\"/>\
             <path transform=\"scale(2)\"/></g></svg>"
        );
    }
}
