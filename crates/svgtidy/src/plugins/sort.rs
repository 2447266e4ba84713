// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::prelude::*;

const ATTRIBUTES_ORDER: &[&str] = &[
    "id", "width", "height", "x", "x1", "x2", "y", "y1", "y2", "cx", "cy", "r", "fill", "stroke",
    "marker", "d", "points",
];

/// Sorts attributes in a conventional order, for a better compression.
pub fn sort_attrs(doc: &mut Document) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            e.attributes.sort_by(|a, b| compare_attributes(&a.name, &b.name));
        }
    }
}

fn namespace_priority(name: &str) -> u8 {
    if name == "xmlns" {
        3
    } else if name.starts_with("xmlns:") {
        2
    } else if name.contains(':') {
        1
    } else {
        0
    }
}

fn compare_attributes(a: &str, b: &str) -> Ordering {
    let (pa, pb) = (namespace_priority(a), namespace_priority(b));
    if pa != pb {
        return pb.cmp(&pa);
    }

    let position = |name: &str| {
        let first = name.split('-').next().unwrap_or(name);
        ATTRIBUTES_ORDER.iter().position(|n| *n == first)
    };

    match (position(a), position(b)) {
        (Some(ia), Some(ib)) if ia != ib => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// Sorts `defs` children by their name frequency, for a better compression.
pub fn sort_defs_children(doc: &mut Document) {
    let defs_list: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|id| doc.is_tag(*id, "defs"))
        .collect();

    for defs in defs_list {
        let mut children = doc.children(defs).to_vec();
        // Text and comments have no clear position after sorting.
        if children.iter().any(|c| !doc.is_element(*c)) {
            continue;
        }

        let name = |id: NodeId| doc.element(id).map(|e| e.name.clone()).unwrap_or_default();

        let mut frequency: HashMap<String, usize> = HashMap::new();
        for c in &children {
            *frequency.entry(name(*c)).or_default() += 1;
        }

        children.sort_by(|a, b| {
            let (na, nb) = (name(*a), name(*b));
            frequency[&nb]
                .cmp(&frequency[&na])
                .then_with(|| nb.len().cmp(&na.len()))
                .then_with(|| nb.cmp(&na))
        });

        for (i, c) in children.into_iter().enumerate() {
            doc.move_to(c, defs, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn attributes() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>\
             <use xlink:href='#a' opacity='.5' fill-opacity='1' d='M0 0' fill='red' id='u'/></svg>",
        )
        .unwrap();
        sort_attrs(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\
             <use xlink:href=\"#a\" id=\"u\" fill=\"red\" fill-opacity=\"1\" d=\"M0 0\" opacity=\".5\"/></svg>"
        );
    }

    #[test]
    fn defs() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><defs><path id='a'/><linearGradient id='b'/>\
             <path id='c'/></defs></svg>",
        )
        .unwrap();
        sort_defs_children(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><defs><path id=\"a\"/><path id=\"c\"/>\
             <linearGradient id=\"b\"/></defs></svg>"
        );
    }
}
