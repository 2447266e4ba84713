// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

/// Removes stroke and fill attributes that have no visible effect.
pub fn remove_useless_stroke_and_fill(doc: &mut Document) {
    if has_scripts(doc) || has_style_sheet(doc) {
        return;
    }

    for id in doc.elements() {
        let e = match doc.element(id) {
            Some(e) => e,
            None => continue,
        };

        if !is_shape_element(&e.name) || e.has_attribute("id") {
            continue;
        }

        let inherited = |name: &str| {
            doc.ancestors(id)
                .find_map(|a| doc.attribute(a, name))
                .map(|v| v.trim().to_string())
        };

        let stroke = inherited("stroke");
        let no_stroke = match stroke.as_deref() {
            None | Some("none") => true,
            _ => {
                inherited("stroke-width").as_deref() == Some("0")
                    || inherited("stroke-opacity").as_deref() == Some("0")
            }
        };

        let parent_stroke = doc
            .parent(id)
            .and_then(|p| doc.ancestors(p).find_map(|a| doc.attribute(a, "stroke")))
            .map(|v| v.trim() != "none")
            .unwrap_or(false);

        let fill = inherited("fill");
        let no_fill = fill.as_deref() == Some("none")
            || inherited("fill-opacity").as_deref() == Some("0");

        let e = match doc.element_mut(id) {
            Some(e) => e,
            None => continue,
        };

        if no_stroke {
            e.attributes.retain(|a| !a.name.starts_with("stroke"));
            if parent_stroke {
                e.set_attribute("stroke", "none");
            }
        }

        if no_fill {
            let has_own = e.attributes.iter().any(|a| a.name.starts_with("fill"));
            e.attributes.retain(|a| !a.name.starts_with("fill-"));
            if has_own {
                e.set_attribute("fill", "none");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn useless_attributes() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><g stroke='red'>\
             <path stroke-width='0' stroke-linecap='round'/></g>\
             <rect stroke-width='2' fill='none' fill-rule='evenodd'/></svg>",
        )
        .unwrap();
        remove_useless_stroke_and_fill(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g stroke=\"red\">\
             <path stroke=\"none\"/></g><rect fill=\"none\"/></svg>"
        );
    }
}
