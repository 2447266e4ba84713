// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

const ANIMATION_ELEMENTS: &[&str] = &["animate", "animateColor", "animateMotion", "animateTransform", "set"];

/// Moves attributes of single-child groups to the child and removes useless groups.
///
/// Does nothing when a style sheet can select elements by the tree shape or by the `g` type.
pub fn collapse_groups(doc: &mut Document) {
    let selectors = SelectorUsage::collect(doc);
    if selectors.is_structural() || selectors.selects_type("g") {
        log::debug!("Groups are selected by a style sheet. Skipped.");
        return;
    }

    let mut groups: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|id| doc.is_tag(*id, "g"))
        .collect();
    // Inner groups first.
    groups.reverse();

    for g in groups {
        let in_switch = doc.parent(g).map(|p| doc.is_tag(p, "switch")) == Some(true);
        if in_switch {
            continue;
        }

        move_attributes_to_child(doc, g);

        let is_empty = doc.element(g).map(|e| e.attributes.is_empty()) == Some(true);
        let has_animations = doc.children(g).iter().any(|c| {
            doc.element(*c).map(|e| is_one_of(&e.name, ANIMATION_ELEMENTS)) == Some(true)
        });
        if is_empty && !has_animations {
            doc.ungroup(g);
        }
    }
}

fn move_attributes_to_child(doc: &mut Document, g: NodeId) {
    let children = doc.children(g);
    if children.len() != 1 {
        return;
    }

    let child = children[0];
    let (group, mut child_elem) = match (doc.element(g), doc.element(child)) {
        (Some(g), Some(c)) => (g.clone(), c.clone()),
        _ => return,
    };

    if group.attributes.is_empty()
        || group.has_attribute("id")
        || group.has_attribute("filter")
        || (group.has_attribute("class") && child_elem.has_attribute("class"))
    {
        return;
    }

    let has_clip = group.has_attribute("clip-path") || group.has_attribute("mask");
    if has_clip && !(child_elem.is("g") && !group.has_attribute("transform")) {
        return;
    }

    // Child bounding box changes with a transform, which affects clipping.
    if group.has_attribute("transform")
        && (child_elem.has_attribute("clip-path") || child_elem.has_attribute("mask"))
    {
        return;
    }

    for attr in &group.attributes {
        match child_elem.attribute(&attr.name) {
            None => child_elem.set_attribute(&attr.name, attr.value.clone()),
            Some(_) if attr.name == "transform" => {
                let value = format!("{} {}", attr.value, child_elem.attribute("transform").unwrap_or_default());
                child_elem.set_attribute("transform", value);
            }
            Some("inherit") => child_elem.set_attribute(&attr.name, attr.value.clone()),
            Some(v) if v == attr.value => {}
            // The child value wins for an inheritable attribute.
            Some(_) if is_inheritable_attribute(&attr.name) => {}
            Some(_) => return,
        }
    }

    if let Some(c) = doc.element_mut(child) {
        *c = child_elem;
    }

    if let Some(g) = doc.element_mut(g) {
        g.attributes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    fn collapse(text: &str) -> String {
        let mut doc = Document::parse(text).unwrap();
        collapse_groups(&mut doc);
        doc.to_string(&WriteOptions::default())
    }

    #[test]
    fn nested_groups() {
        assert_eq!(
            collapse(
                "<svg xmlns='http://www.w3.org/2000/svg'><g><g fill='red' transform='scale(2)'>\
                 <path transform='rotate(1)' fill='blue'/></g></g></svg>"
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\
             <path transform=\"scale(2) rotate(1)\" fill=\"blue\"/></svg>"
        );
    }

    #[test]
    fn groups_selected_by_type() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>g{fill:red}</style>\
                    <g><g><rect width=\"40\" height=\"40\"/></g></g></svg>";
        assert_eq!(collapse(text), text);
    }

    #[test]
    fn groups_selected_by_combinator() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>svg > rect{fill:red}</style>\
                    <g><rect width=\"40\" height=\"40\"/></g></svg>";
        assert_eq!(collapse(text), text);
    }

    #[test]
    fn class_selectors_allow_collapsing() {
        assert_eq!(
            collapse(
                "<svg xmlns='http://www.w3.org/2000/svg'><style>.a{fill:red}</style>\
                 <g><path class='a'/></g></svg>"
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>.a{fill:red}</style><path class=\"a\"/></svg>"
        );
    }

    #[test]
    fn clip_path_stays() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><g clip-path=\"url(#a)\"><path/></g></svg>";
        assert_eq!(collapse(text), text);
    }
}
