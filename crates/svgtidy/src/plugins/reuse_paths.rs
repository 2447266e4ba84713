// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::prelude::*;

/// Replaces repeated paths with `use` elements referencing a single definition.
pub fn reuse_paths(doc: &mut Document) {
    // (d, fill, stroke) -> paths
    let mut groups: Vec<((String, Option<String>, Option<String>), Vec<NodeId>)> = Vec::new();
    let mut index: HashMap<(String, Option<String>, Option<String>), usize> = HashMap::new();

    for id in doc.elements() {
        let e = match doc.element(id) {
            Some(e) => e,
            None => continue,
        };

        if !e.is("path") || e.has_attribute("id") || !doc.children(id).is_empty() {
            continue;
        }

        let in_defs = doc.ancestors(id).skip(1).any(|a| {
            doc.element(a).map(|e| e.is("defs") || is_one_of(&e.name, REFERENCED_ELEMENTS)) == Some(true)
        });
        if in_defs {
            continue;
        }

        let d = match e.attribute("d") {
            Some(v) => v.to_string(),
            None => continue,
        };

        let key = (
            d,
            e.attribute("fill").map(|s| s.to_string()),
            e.attribute("stroke").map(|s| s.to_string()),
        );

        match index.get(&key) {
            Some(idx) => groups[*idx].1.push(id),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![id]));
            }
        }
    }

    groups.retain(|(_, list)| list.len() > 1);
    if groups.is_empty() {
        return;
    }

    let svg = doc.root_element();
    let defs = match doc.child_elements(svg).into_iter().find(|c| doc.is_tag(*c, "defs")) {
        Some(v) => v,
        None => doc.insert(svg, 0, NodeKind::Element(Element::new("defs"))),
    };

    if let Some(e) = doc.element_mut(svg) {
        if !e.has_attribute("xmlns:xlink") {
            e.set_attribute("xmlns:xlink", XLINK_NS);
        }
    }

    let ids = collect_ids(doc);
    let mut counter = 0;
    for ((d, fill, stroke), list) in groups {
        let mut new_id = format!("reuse-{}", counter);
        while ids.contains_key(&new_id) {
            counter += 1;
            new_id = format!("reuse-{}", counter);
        }
        counter += 1;

        let mut def = Element::new("path");
        def.set_attribute("id", new_id.clone());
        def.set_attribute("d", d);
        if let Some(fill) = fill {
            def.set_attribute("fill", fill);
        }
        if let Some(stroke) = stroke {
            def.set_attribute("stroke", stroke);
        }
        doc.append(defs, NodeKind::Element(def));

        for id in list {
            doc.rename(id, "use");
            if let Some(e) = doc.element_mut(id) {
                e.remove_attribute("d");
                e.remove_attribute("fill");
                e.remove_attribute("stroke");
                e.set_attribute("xlink:href", format!("#{}", new_id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn repeated_paths() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><path d='M0 0h5' fill='red'/>\
             <path d='M0 0h5' fill='red' transform='translate(5)'/><path d='M1 1'/></svg>",
        )
        .unwrap();
        reuse_paths(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\
             <defs><path id=\"reuse-0\" d=\"M0 0h5\" fill=\"red\"/></defs>\
             <use xlink:href=\"#reuse-0\"/><use transform=\"translate(5)\" xlink:href=\"#reuse-0\"/>\
             <path d=\"M1 1\"/></svg>"
        );
    }
}
