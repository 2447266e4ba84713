// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::str::FromStr;

use super::prelude::*;

/// Removes elements that are never rendered.
pub fn remove_hidden_elems(doc: &mut Document) {
    if has_scripts(doc) {
        return;
    }

    let references = collect_references(doc);
    let count = doc.remove_all(|doc, id| {
        let e = match doc.element(id) {
            Some(e) => e,
            None => return false,
        };

        if id == doc.root_element() || is_referenced(doc, id, &references) {
            return false;
        }

        is_hidden(doc, id, e)
    });

    if count != 0 {
        log::debug!("Removed {} hidden element(s).", count);
    }
}

fn is_referenced(doc: &Document, id: NodeId, references: &HashSet<String>) -> bool {
    doc.descendants(id)
        .into_iter()
        .filter_map(|n| doc.attribute(n, "id"))
        .any(|v| references.contains(v))
}

fn is_hidden(doc: &Document, id: NodeId, e: &Element) -> bool {
    if e.attribute("display").map(str::trim) == Some("none") {
        return true;
    }

    // Masks and clip paths use geometry, not opacity.
    if e.attribute("opacity").map(str::trim) == Some("0") {
        let in_clip = doc.ancestors(id).any(|a| doc.is_tag(a, "clipPath"));
        if !in_clip {
            return true;
        }
    }

    let is_zero = |name: &str| -> bool {
        match e.attribute(name).map(svgtypes::Length::from_str) {
            Some(Ok(l)) => l.number == 0.0,
            _ => false,
        }
    };

    match e.name.as_str() {
        "circle" => is_zero("r"),
        "ellipse" => is_zero("rx") || is_zero("ry"),
        "rect" | "image" | "pattern" => is_zero("width") || is_zero("height"),
        "path" => match e.attribute("d") {
            Some(d) => !has_drawing_segments(d),
            None => true,
        },
        "polyline" | "polygon" => match e.attribute("points") {
            Some(points) => points.trim().is_empty(),
            None => true,
        },
        _ => false,
    }
}

fn has_drawing_segments(d: &str) -> bool {
    svgtypes::PathParser::from(d)
        .filter_map(|s| s.ok())
        .any(|s| !matches!(s, svgtypes::PathSegment::MoveTo { .. }))
}

/// Removes text elements without any content.
pub fn remove_empty_text(doc: &mut Document) {
    doc.remove_all(|doc, id| {
        let e = match doc.element(id) {
            Some(e) => e,
            None => return false,
        };

        match e.name.as_str() {
            "text" | "tspan" => doc.children(id).is_empty(),
            "tref" => e.href().is_none(),
            _ => false,
        }
    });
}

/// Removes containers without children.
pub fn remove_empty_containers(doc: &mut Document) {
    let root = doc.root_element();
    // Bottom-up, so a container can become empty after its children were removed.
    let mut list = doc.descendants(root);
    list.reverse();

    for id in list {
        if id == root || !doc.children(id).is_empty() {
            continue;
        }

        let e = match doc.element(id) {
            Some(e) => e,
            None => continue,
        };

        if !is_container_element(&e.name) || e.is("svg") {
            continue;
        }

        // An empty pattern can still be referenced and inherit content via `href`.
        if e.is("pattern") && !e.attributes.is_empty() {
            continue;
        }

        // A filter on a group can render something without children.
        if e.is("g") && e.has_attribute("filter") {
            continue;
        }

        if e.is("mask") && e.has_attribute("id") {
            continue;
        }

        doc.detach(id);
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
    fn hidden() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>\
                 <rect width='0' height='5'/><circle r='1'/><path d='M10 10'/>\
                 <g display='none'><path id='p' d='M0 0L1 1'/></g><use xlink:href='#p'/>\
                 <g opacity='0'/></svg>",
                remove_hidden_elems
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\
             <circle r=\"1\"/><g display=\"none\"><path id=\"p\" d=\"M0 0L1 1\"/></g>\
             <use xlink:href=\"#p\"/></svg>"
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg'><defs><g/></defs><g filter='url(#f)'/>\
                 <text/></svg>",
                remove_empty_containers
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g filter=\"url(#f)\"/><text/></svg>"
        );
    }
}
