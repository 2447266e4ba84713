// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

// An empty conditional attribute disables the element, so it must stay.
const CONDITIONAL_ATTRIBUTES: &[&str] = &["requiredExtensions", "requiredFeatures", "systemLanguage"];

/// Collapses newlines and repeated spaces in attribute values.
pub fn cleanup_attrs(doc: &mut Document) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            for attr in &mut e.attributes {
                if attr.value.contains(|c: char| c == '\n' || c == '\r' || c == '\t')
                    || attr.value.contains("  ")
                    || attr.value.trim().len() != attr.value.len()
                {
                    attr.value = collapse_spaces(&attr.value);
                }
            }
        }
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn remove_empty_attrs(doc: &mut Document) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            e.attributes.retain(|a| {
                !a.value.trim().is_empty() || is_one_of(&a.name, CONDITIONAL_ATTRIBUTES)
            });
        }
    }
}
