// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

/// Splits a `style` attribute into presentation attributes.
pub fn convert_style_to_attrs(doc: &mut Document) {
    for id in doc.elements() {
        let e = match doc.element_mut(id) {
            Some(e) => e,
            None => continue,
        };

        let style = match e.attribute("style") {
            Some(v) => v.to_string(),
            None => continue,
        };

        let mut rest = Vec::new();
        let mut attrs = Vec::new();
        for d in simplecss::DeclarationTokenizer::from(style.as_str()) {
            // `!important` would lose its meaning as an attribute.
            if is_presentation_attribute(d.name) && !d.important && !d.value.contains("/*") {
                attrs.push((d.name.to_string(), d.value.to_string()));
            } else if d.important {
                rest.push(format!("{}:{}!important", d.name, d.value));
            } else {
                rest.push(format!("{}:{}", d.name, d.value));
            }
        }

        for (name, value) in attrs {
            e.set_attribute(&name, value);
        }

        if rest.is_empty() {
            e.remove_attribute("style");
        } else {
            e.set_attribute("style", rest.join(";"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn split() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
             <rect fill='red' style='fill:blue;stroke:#000!important;x-custom:1'/></svg>",
        )
        .unwrap();
        convert_style_to_attrs(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\
             <rect fill=\"blue\" style=\"stroke:#000!important;x-custom:1\"/></svg>"
        );
    }
}
