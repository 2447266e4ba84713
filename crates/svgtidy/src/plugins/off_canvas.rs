// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::path_data::{control_bbox, parse_absolute};
use super::prelude::*;

/// Removes paths that are drawn completely outside the `viewBox`.
pub fn remove_off_canvas_paths(doc: &mut Document) {
    let svg = doc.root_element();
    let view_box = match canvas_rect(doc, svg) {
        Some(v) => v,
        None => return,
    };

    let count = doc.remove_all(|doc, id| {
        if !doc.is_tag(id, "path") {
            return false;
        }

        let is_transformed_or_referenced = doc.ancestors(id).any(|a| {
            doc.element(a)
                .map(|e| {
                    e.has_attribute("transform")
                        || e.is("defs")
                        || is_one_of(&e.name, REFERENCED_ELEMENTS)
                        || (a != svg && e.is("svg"))
                })
                == Some(true)
        });
        if is_transformed_or_referenced {
            return false;
        }

        let bbox = match doc
            .attribute(id, "d")
            .and_then(parse_absolute)
            .and_then(|s| control_bbox(&s))
        {
            Some(v) => v,
            None => return false,
        };

        // A stroke can reach the canvas even when the geometry does not.
        let stroke_width = doc
            .ancestors(id)
            .find_map(|a| doc.attribute(a, "stroke-width"))
            .and_then(parse_leading_number)
            .unwrap_or(1.0)
            .abs();

        let (x, y, w, h) = view_box;
        bbox.2 + stroke_width < x
            || bbox.0 - stroke_width > x + w
            || bbox.3 + stroke_width < y
            || bbox.1 - stroke_width > y + h
    });

    if count != 0 {
        log::debug!("Removed {} off-canvas path(s).", count);
    }
}

fn canvas_rect(doc: &Document, svg: NodeId) -> Option<(f64, f64, f64, f64)> {
    if let Some(vb) = doc.attribute(svg, "viewBox").and_then(|v| svgtypes::ViewBox::from_str(v).ok()) {
        return Some((vb.x, vb.y, vb.w, vb.h));
    }

    let width = doc.attribute(svg, "width")?.trim().parse::<f64>().ok()?;
    let height = doc.attribute(svg, "height")?.trim().parse::<f64>().ok()?;
    Some((0.0, 0.0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn outside_paths() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 10 10'>\
             <path d='M20 20h5v5z'/><path d='M5 5h10'/><g transform='translate(-20)'><path d='M20 0h1'/></g></svg>",
        )
        .unwrap();
        remove_off_canvas_paths(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 10 10\">\
             <path d=\"M5 5h10\"/><g transform=\"translate(-20)\"><path d=\"M20 0h1\"/></g></svg>"
        );
    }
}
