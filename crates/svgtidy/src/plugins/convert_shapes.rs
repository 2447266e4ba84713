// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

/// Converts basic shapes to paths when the path is not longer.
///
/// Circles and ellipses are kept as is, because arcs are longer.
///
/// A shape selected by a style sheet by its type or attributes is kept.
pub fn convert_shape_to_path(doc: &mut Document, opt: &Options) {
    let p = opt.float_precision;
    let selectors = SelectorUsage::collect(doc);
    for id in doc.elements() {
        let e = match doc.element(id) {
            Some(e) => e,
            None => continue,
        };

        if selectors.attributes || selectors.selects_type("path") || selectors.selects_type(&e.name) {
            continue;
        }

        let number = |name: &str| -> Option<f64> {
            match e.attribute(name) {
                Some(v) => v.trim().parse::<f64>().ok(),
                None => Some(0.0),
            }
        };

        let (d, used): (Option<String>, &[&str]) = match e.name.as_str() {
            "rect" => {
                // Rounded corners require arcs.
                if e.has_attribute("rx") || e.has_attribute("ry") {
                    continue;
                }

                let (x, y) = match (number("x"), number("y")) {
                    (Some(x), Some(y)) => (x, y),
                    _ => continue,
                };

                // Both sizes must be set explicitly and be plain numbers.
                let (w, h) = match (e.attribute("width"), e.attribute("height")) {
                    (Some(_), Some(_)) => match (number("width"), number("height")) {
                        (Some(w), Some(h)) => (w, h),
                        _ => continue,
                    },
                    _ => continue,
                };

                let mut d = String::from("M");
                push_compact(&mut d, &format_number(x, p));
                push_compact(&mut d, &format_number(y, p));
                d.push('H');
                push_compact(&mut d, &format_number(x + w, p));
                d.push('V');
                push_compact(&mut d, &format_number(y + h, p));
                d.push('H');
                push_compact(&mut d, &format_number(x, p));
                d.push('z');
                (Some(d), &["x", "y", "width", "height"])
            }
            "line" => {
                let coords = [number("x1"), number("y1"), number("x2"), number("y2")];
                if coords.iter().any(|c| c.is_none()) {
                    continue;
                }

                let mut d = String::from("M");
                for c in coords.iter().flatten() {
                    push_compact(&mut d, &format_number(*c, p));
                }
                (Some(d), &["x1", "y1", "x2", "y2"])
            }
            "polyline" | "polygon" => {
                let points = e.attribute("points").unwrap_or_default();
                let mut coords = Vec::new();
                for n in svgtypes::NumberListParser::from(points) {
                    match n {
                        Ok(n) => coords.push(n),
                        Err(_) => break,
                    }
                }

                // A single point does not render.
                if coords.len() < 4 {
                    (None, &["points"])
                } else {
                    let mut d = String::from("M");
                    for pair in coords.chunks_exact(2) {
                        push_compact(&mut d, &format_number(pair[0], p));
                        push_compact(&mut d, &format_number(pair[1], p));
                    }

                    if e.is("polygon") {
                        d.push('z');
                    }

                    (Some(d), &["points"])
                }
            }
            _ => continue,
        };

        match d {
            Some(d) => {
                doc.rename(id, "path");
                if let Some(e) = doc.element_mut(id) {
                    e.attributes.retain(|a| !used.contains(&a.name.as_str()));
                    e.set_attribute("d", d);
                }
            }
            None => doc.detach(id),
        }
    }
}

/// Converts ellipses with equal radiuses to circles.
pub fn convert_ellipse_to_circle(doc: &mut Document) {
    let selectors = SelectorUsage::collect(doc);
    if selectors.attributes || selectors.selects_type("ellipse") || selectors.selects_type("circle") {
        return;
    }

    for id in doc.elements() {
        if !doc.is_tag(id, "ellipse") {
            continue;
        }

        let (rx, ry) = match doc.element(id) {
            Some(e) => (
                e.attribute("rx").unwrap_or("0").trim().to_string(),
                e.attribute("ry").unwrap_or("0").trim().to_string(),
            ),
            None => continue,
        };

        let r = if rx == ry || ry == "auto" {
            rx
        } else if rx == "auto" {
            ry
        } else {
            continue;
        };

        doc.rename(id, "circle");
        if let Some(e) = doc.element_mut(id) {
            e.remove_attribute("rx");
            e.remove_attribute("ry");
            e.set_attribute("r", r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn shapes() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><rect x='1' y='2' width='10' height='5' fill='red'/>\
             <rect width='1' height='1' rx='1'/><line x2='5' y2='-5'/>\
             <polygon points='0 0 10 0 10 10'/><polyline points='5 5'/></svg>",
        )
        .unwrap();
        convert_shape_to_path(&mut doc, &Options::default());
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><path fill=\"red\" d=\"M1 2H11V7H1z\"/>\
             <rect width=\"1\" height=\"1\" rx=\"1\"/><path d=\"M0 0 5-5\"/>\
             <path d=\"M0 0 10 0 10 10z\"/></svg>"
        );
    }

    #[test]
    fn ellipses() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><ellipse cx='5' rx='2' ry='2'/><ellipse rx='1' ry='2'/></svg>",
        )
        .unwrap();
        convert_ellipse_to_circle(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><circle cx=\"5\" r=\"2\"/><ellipse rx=\"1\" ry=\"2\"/></svg>"
        );
    }

    #[test]
    fn shapes_selected_by_type() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>rect{fill:green} .a{fill:red}</style>\
                    <rect class=\"a\" width=\"40\" height=\"40\"/><rect x=\"50\" width=\"40\" height=\"40\"/>\
                    <line x2=\"5\" y2=\"5\"/></svg>";
        let mut doc = Document::parse(text).unwrap();
        convert_shape_to_path(&mut doc, &Options::default());
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>rect{fill:green} .a{fill:red}</style>\
             <rect class=\"a\" width=\"40\" height=\"40\"/><rect x=\"50\" width=\"40\" height=\"40\"/>\
             <path d=\"M0 0 5 5\"/></svg>"
        );
    }

    #[test]
    fn paths_selected_by_type() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>path{fill:red}</style>\
                    <rect width=\"4\" height=\"4\"/><ellipse rx=\"1\" ry=\"1\"/></svg>";
        let mut doc = Document::parse(text).unwrap();
        convert_shape_to_path(&mut doc, &Options::default());
        convert_ellipse_to_circle(&mut doc);
        assert!(doc.to_string(&WriteOptions::default()).contains("<rect width=\"4\" height=\"4\"/>"));
        assert!(doc.to_string(&WriteOptions::default()).contains("<circle"));

        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>circle{fill:red}</style>\
                    <ellipse rx=\"1\" ry=\"1\"/></svg>";
        let mut doc = Document::parse(text).unwrap();
        convert_ellipse_to_circle(&mut doc);
        assert!(doc.to_string(&WriteOptions::default()).contains("<ellipse rx=\"1\" ry=\"1\"/>"));
    }
}
