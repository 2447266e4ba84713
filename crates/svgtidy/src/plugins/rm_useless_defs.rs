// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

const NON_RENDERING_ELEMENTS: &[&str] = &[
    "clipPath", "filter", "linearGradient", "marker", "mask", "pattern", "radialGradient",
    "solidColor", "symbol",
];

/// Removes `defs` content and non-rendering elements that cannot be referenced.
pub fn remove_useless_defs(doc: &mut Document) {
    // Non-rendering elements without an id can't be used at all.
    doc.remove_all(|doc, id| {
        doc.element(id)
            .map(|e| is_one_of(&e.name, NON_RENDERING_ELEMENTS) && !e.has_attribute("id"))
            == Some(true)
    });

    let defs_list: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|id| doc.is_tag(*id, "defs"))
        .collect();

    for defs in defs_list {
        let mut useful = Vec::new();
        for child in doc.children(defs).to_vec() {
            collect_useful(doc, child, &mut useful);
        }

        for child in doc.children(defs).to_vec() {
            doc.detach(child);
        }

        for node in useful {
            let len = doc.children(defs).len();
            doc.move_to(node, defs, len);
        }
    }
}

fn collect_useful(doc: &Document, id: NodeId, useful: &mut Vec<NodeId>) {
    let e = match doc.element(id) {
        Some(e) => e,
        None => return,
    };

    if e.is("style") || e.has_attribute("id") {
        useful.push(id);
        return;
    }

    for child in doc.children(id) {
        collect_useful(doc, *child, useful);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn nested_ids_are_kept() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><defs><g><path id='a'/></g><path/>\
             <linearGradient/></defs></svg>",
        )
        .unwrap();
        remove_useless_defs(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><defs><path id=\"a\"/></defs></svg>"
        );
    }
}
