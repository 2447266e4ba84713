// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::prelude::*;

/// Moves `style` element rules into `style` attributes.
///
/// A style sheet is inlined only as a whole: every rule must match exactly one element,
/// must not use `!important` and must not compete with another rule for the same property.
/// Otherwise the sheet is left untouched.
pub fn inline_styles(doc: &mut Document) {
    let styles: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|id| doc.is_tag(*id, "style"))
        .collect();

    for style_id in styles {
        inline_sheet(doc, style_id);
    }
}

fn inline_sheet(doc: &mut Document, style_id: NodeId) {
    if !matches!(doc.attribute(style_id, "type"), None | Some("") | Some("text/css")) {
        return;
    }

    if doc.attribute(style_id, "media").is_some() {
        return;
    }

    let text = doc.text_content(style_id);
    // At-rules are skipped by the CSS parser, so we cannot inline them.
    if text.contains('@') || text.trim().is_empty() {
        return;
    }

    let sheet = simplecss::StyleSheet::parse(&text);
    if sheet.rules.len() != rule_blocks_count(&text) {
        log::debug!("A style sheet has unsupported rules. Skipped.");
        return;
    }

    // element -> declarations in the sheet order
    let mut inlined: HashMap<NodeId, Vec<(String, String)>> = HashMap::new();
    for rule in &sheet.rules {
        if rule.declarations.iter().any(|d| d.important) {
            return;
        }

        let matched: Vec<NodeId> = doc
            .elements()
            .into_iter()
            .filter(|id| rule.selector.matches(&doc.node(*id)))
            .collect();
        if matched.len() != 1 {
            return;
        }

        let list = inlined.entry(matched[0]).or_default();
        for d in &rule.declarations {
            if list.iter().any(|(name, _)| name == d.name) {
                return;
            }

            list.push((d.name.to_string(), d.value.to_string()));
        }
    }

    let classes = selector_classes(&text);

    for (id, declarations) in inlined {
        let e = match doc.element_mut(id) {
            Some(e) => e,
            None => continue,
        };

        let existing = e.attribute("style").unwrap_or_default().to_string();
        let existing: Vec<(String, String)> = simplecss::DeclarationTokenizer::from(existing.as_str())
            .map(|d| (d.name.to_string(), d.value.to_string()))
            .collect();

        // A `style` attribute has a higher priority than a style sheet.
        let mut style: Vec<String> = declarations
            .iter()
            .filter(|(name, _)| !existing.iter().any(|(n, _)| n == name))
            .map(|(name, value)| format!("{}:{}", name, value))
            .collect();
        style.extend(existing.iter().map(|(name, value)| format!("{}:{}", name, value)));
        e.set_attribute("style", style.join(";"));
    }

    doc.detach(style_id);

    if has_style_sheet(doc) {
        return;
    }

    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            let class = match e.attribute("class") {
                Some(v) => v,
                None => continue,
            };

            let class: Vec<&str> = class
                .split_ascii_whitespace()
                .filter(|c| !classes.iter().any(|s| s == c))
                .collect();
            if class.is_empty() {
                e.remove_attribute("class");
            } else {
                let class = class.join(" ");
                e.set_attribute("class", class);
            }
        }
    }
}

// The number of `selector { ... }` blocks.
fn rule_blocks_count(css: &str) -> usize {
    strip_comments(css).matches('{').count()
}

fn strip_comments(css: &str) -> String {
    let mut out = String::new();
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

// Class names mentioned in selectors.
fn selector_classes(css: &str) -> Vec<String> {
    let css = strip_comments(css);
    let mut classes = Vec::new();
    let mut in_block = false;
    let mut chars = css.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => in_block = true,
            '}' => in_block = false,
            '.' if !in_block => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '-' || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if !name.is_empty() {
                    classes.push(name);
                }
            }
            _ => {}
        }
    }

    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    fn inline(text: &str) -> String {
        let mut doc = Document::parse(text).unwrap();
        inline_styles(&mut doc);
        doc.to_string(&WriteOptions::default())
    }

    #[test]
    fn single_match() {
        assert_eq!(
            inline(
                "<svg xmlns='http://www.w3.org/2000/svg'><style>.a{fill:red}</style>\
                 <rect class='a b' style='fill:blue;opacity:.5'/><circle id='c'/></svg>"
            ),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\
             <rect class=\"b\" style=\"fill:blue;opacity:.5\"/><circle id=\"c\"/></svg>"
        );
    }

    #[test]
    fn multiple_matches_are_kept() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>rect{fill:red}</style>\
                    <rect/><rect/></svg>";
        assert_eq!(inline(text), text);
    }

    #[test]
    fn classes() {
        assert_eq!(selector_classes("g .a, .b-c > path { fill: .5 }"), ["a", "b-c"]);
    }
}
