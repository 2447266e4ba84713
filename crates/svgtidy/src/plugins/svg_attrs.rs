// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::prelude::*;

/// Removes `viewBox` when it matches `width`/`height`.
pub fn remove_view_box(doc: &mut Document) {
    for id in doc.elements() {
        let e = match doc.element(id) {
            Some(e) => e,
            None => continue,
        };

        if !is_one_of(&e.name, &["pattern", "svg", "symbol"]) {
            continue;
        }

        // Nested `svg` elements rely on `viewBox` for scaling.
        if e.is("svg") && id != doc.root_element() {
            continue;
        }

        let vb = match e.attribute("viewBox").and_then(|v| svgtypes::ViewBox::from_str(v).ok()) {
            Some(v) => v,
            None => continue,
        };

        let width = e.attribute("width").and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok());
        let height = e.attribute("height").and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok());
        if let (Some(w), Some(h)) = (width, height) {
            if vb.x == 0.0 && vb.y == 0.0 && vb.w == w && vb.h == h {
                if let Some(e) = doc.element_mut(id) {
                    e.remove_attribute("viewBox");
                }
            }
        }
    }
}

/// Removes `width`/`height` from the root element, keeping a `viewBox`.
pub fn remove_dimensions(doc: &mut Document) {
    let svg = doc.root_element();
    let e = match doc.element_mut(svg) {
        Some(e) => e,
        None => return,
    };

    if !e.has_attribute("viewBox") {
        let width = e.attribute("width").and_then(|v| v.trim().parse::<f64>().ok());
        let height = e.attribute("height").and_then(|v| v.trim().parse::<f64>().ok());
        match (width, height) {
            (Some(w), Some(h)) => {
                let vb = format!("0 0 {} {}", w, h);
                e.set_attribute("viewBox", vb);
            }
            // Without a `viewBox` the image would lose its size.
            _ => return,
        }
    }

    e.remove_attribute("width");
    e.remove_attribute("height");
}

/// Removes `enable-background` when it is useless.
pub fn cleanup_enable_background(doc: &mut Document) {
    let uses_background = doc.elements().into_iter().any(|id| {
        doc.element(id)
            .map(|e| e.name.starts_with("fe") && e.attributes.iter().any(|a| {
                (a.name == "in" || a.name == "in2") && a.value.trim() == "BackgroundImage"
            }))
            == Some(true)
    });

    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            let value = match e.attribute("enable-background") {
                Some(v) => v.trim().to_string(),
                None => continue,
            };

            if !uses_background {
                e.remove_attribute("enable-background");
                continue;
            }

            if !is_one_of(&e.name, &["mask", "pattern", "svg"]) {
                continue;
            }

            let is_default = match (e.attribute("width"), e.attribute("height")) {
                (Some(w), Some(h)) => value == format!("new 0 0 {} {}", w.trim(), h.trim()),
                _ => false,
            };

            if is_default {
                e.remove_attribute("enable-background");
            }
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
    fn view_box() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24px' viewBox='0 0 24 24'/>",
                remove_view_box
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24px\"/>"
        );
    }

    #[test]
    fn dimensions() {
        assert_eq!(
            run("<svg xmlns='http://www.w3.org/2000/svg' width='24' height='16'/>", remove_dimensions),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 16\"/>"
        );
    }

    #[test]
    fn enable_background() {
        assert_eq!(
            run(
                "<svg xmlns='http://www.w3.org/2000/svg' enable-background='new 0 0 10 10'/>",
                cleanup_enable_background
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"/>"
        );
    }
}
