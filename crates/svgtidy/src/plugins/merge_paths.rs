// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::path_data::{control_bbox, parse_absolute};
use super::prelude::*;

// Attributes that make the path rendering depend on its own geometry.
const UNSAFE_ATTRIBUTES: &[&str] = &[
    "clip-path", "filter", "id", "marker-end", "marker-mid", "marker-start", "mask",
];

/// Merges adjacent paths with the same attributes.
pub fn merge_paths(doc: &mut Document) {
    // Selectors like `:first-child` depend on the element count.
    if has_style_sheet(doc) {
        return;
    }

    for parent in doc.elements() {
        let children = doc.children(parent).to_vec();
        let mut prev: Option<NodeId> = None;
        for child in children {
            let can_merge = match prev {
                Some(prev) => is_mergeable(doc, prev, child),
                None => false,
            };

            let prev_id = match (can_merge, prev) {
                (true, Some(v)) => v,
                _ => {
                    prev = if is_candidate(doc, child) { Some(child) } else { None };
                    continue;
                }
            };

            let d1 = doc.attribute(prev_id, "d").unwrap_or_default().to_string();
            let d2 = doc.attribute(child, "d").unwrap_or_default().to_string();
            if let Some(e) = doc.element_mut(prev_id) {
                e.set_attribute("d", format!("{}{}", d1, d2));
            }
            doc.detach(child);
        }
    }
}

fn is_candidate(doc: &Document, id: NodeId) -> bool {
    let e = match doc.element(id) {
        Some(e) => e,
        None => return false,
    };

    e.is("path")
        && doc.children(id).is_empty()
        && e.has_attribute("d")
        && !e.attributes.iter().any(|a| is_one_of(&a.name, UNSAFE_ATTRIBUTES))
}

fn is_mergeable(doc: &Document, prev: NodeId, next: NodeId) -> bool {
    if !is_candidate(doc, next) {
        return false;
    }

    let (e1, e2) = match (doc.element(prev), doc.element(next)) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    let same_attrs = e1.attributes.len() == e2.attributes.len()
        && e1
            .attributes
            .iter()
            .filter(|a| a.name != "d")
            .all(|a| e2.attribute(&a.name) == Some(a.value.as_str()));
    if !same_attrs {
        return false;
    }

    let d1 = e1.attribute("d").unwrap_or_default();
    let d2 = e2.attribute("d").unwrap_or_default();

    // A leading relative `m` would become relative to the previous path end.
    if !d2.trim_start().starts_with('M') {
        return false;
    }

    // Overlapping shapes would change the fill rule result.
    let bbox1 = parse_absolute(d1).and_then(|s| control_bbox(&s));
    let bbox2 = parse_absolute(d2).and_then(|s| control_bbox(&s));
    match (bbox1, bbox2) {
        (Some(a), Some(b)) => a.2 < b.0 || b.2 < a.0 || a.3 < b.1 || b.3 < a.1,
        _ => false,
    }
}
