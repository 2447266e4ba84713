// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;
use super::AttributeSelector;

/// Removes attributes from elements matched by CSS selectors.
pub fn remove_attributes_by_selector(doc: &mut Document, rules: &[AttributeSelector]) {
    for rule in rules {
        let selector = match simplecss::Selector::parse(&rule.selector) {
            Some(v) => v,
            None => {
                log::warn!("'{}' is not a valid selector. Skipped.", rule.selector);
                continue;
            }
        };

        let matched: Vec<NodeId> = doc
            .elements()
            .into_iter()
            .filter(|id| selector.matches(&doc.node(*id)))
            .collect();

        for id in matched {
            if let Some(e) = doc.element_mut(id) {
                e.attributes.retain(|a| !rule.attributes.contains(&a.name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn by_selector() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><rect fill='red' stroke='blue'/>\
             <circle fill='red'/></svg>",
        )
        .unwrap();
        let rules = [AttributeSelector {
            selector: "rect".to_string(),
            attributes: vec!["fill".to_string(), "stroke".to_string()],
        }];
        remove_attributes_by_selector(&mut doc, &rules);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><rect/><circle fill=\"red\"/></svg>"
        );
    }
}
