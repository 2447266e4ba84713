// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::{HashMap, HashSet};

use crate::tree::{Document, NodeId, NodeKind};

/// Returns ids referenced via `url(#id)` in a value.
pub fn url_references(value: &str) -> Vec<&str> {
    let mut list = Vec::new();
    let mut rest = value;
    while let Some(start) = rest.find("url(") {
        rest = &rest[start + 4..];
        let end = match rest.find(')') {
            Some(v) => v,
            None => break,
        };

        let inner = rest[..end].trim().trim_matches(|c| c == '"' || c == '\'');
        if let Some(id) = inner.strip_prefix('#') {
            list.push(id);
        }

        rest = &rest[end..];
    }

    list
}

/// Returns an id referenced via `href="#id"`.
pub fn href_reference(value: &str) -> Option<&str> {
    value.trim().strip_prefix('#')
}

/// Checks that the attribute can contain a link.
pub fn is_href_attribute(name: &str) -> bool {
    name == "href" || name == "xlink:href"
}

/// Collects all referenced ids, including references from `style` elements.
pub fn collect_references(doc: &Document) -> HashSet<String> {
    let mut ids = HashSet::new();
    for id in doc.elements() {
        let e = match doc.element(id) {
            Some(e) => e,
            None => continue,
        };

        for attr in &e.attributes {
            if is_href_attribute(&attr.name) {
                if let Some(link) = href_reference(&attr.value) {
                    ids.insert(link.to_string());
                }
            } else {
                for link in url_references(&attr.value) {
                    ids.insert(link.to_string());
                }
            }
        }

        if e.is("style") {
            let text = doc.text_content(id);
            for link in url_references(&text) {
                ids.insert(link.to_string());
            }
        }
    }

    ids
}

/// Maps all element ids to their nodes.
pub fn collect_ids(doc: &Document) -> HashMap<String, NodeId> {
    let mut map = HashMap::new();
    for id in doc.elements() {
        if let Some(value) = doc.attribute(id, "id") {
            map.entry(value.to_string()).or_insert(id);
        }
    }

    map
}

/// Checks that the document has scripts or styles,
/// which can reference elements in a way we cannot track.
pub fn has_scripts(doc: &Document) -> bool {
    doc.elements().into_iter().any(|id| {
        let e = match doc.element(id) {
            Some(e) => e,
            None => return false,
        };

        e.is("script") || e.attributes.iter().any(|a| crate::tree::is_event_attribute(&a.name))
    })
}

/// Checks that the document has a `style` element with some content.
pub fn has_style_sheet(doc: &Document) -> bool {
    doc.elements().into_iter().any(|id| {
        doc.is_tag(id, "style")
            && doc
                .children(id)
                .iter()
                .any(|c| matches!(doc.kind(*c), NodeKind::Text(ref s) if !s.trim().is_empty()))
    })
}

/// What style sheet selectors depend on.
///
/// Selectors are scanned as text, so the result is an over-approximation.
#[derive(Clone, Default, Debug)]
pub struct SelectorUsage {
    /// Type selectors, like `rect` in `g > rect.a`.
    pub types: HashSet<String>,
    /// A `*` selector is present.
    pub universal: bool,
    /// Combinators or pseudo-classes are present.
    pub structural: bool,
    /// Attribute selectors are present.
    pub attributes: bool,
}

impl SelectorUsage {
    /// Scans all `style` elements of a document.
    pub fn collect(doc: &Document) -> Self {
        let mut usage = SelectorUsage::default();
        for id in doc.elements() {
            if doc.is_tag(id, "style") {
                usage.scan_sheet(&doc.text_content(id));
            }
        }

        usage
    }

    /// Checks that an element with this name can be selected by its type.
    pub fn selects_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// Checks that selectors can depend on the tree shape or on attributes.
    pub fn is_structural(&self) -> bool {
        self.structural || self.universal || self.attributes
    }

    fn scan_sheet(&mut self, text: &str) {
        let text = strip_css_comments(text);
        let mut prelude_start = 0;
        for (i, c) in text.char_indices() {
            match c {
                '{' => {
                    let prelude = text[prelude_start..i].trim();
                    if !prelude.starts_with('@') {
                        for selector in prelude.split(',') {
                            self.scan_selector(selector.trim());
                        }
                    }

                    prelude_start = i + 1;
                }
                '}' | ';' => prelude_start = i + 1,
                _ => {}
            }
        }
    }

    fn scan_selector(&mut self, selector: &str) {
        let chars: Vec<char> = selector.chars().collect();
        let mut compound_start = true;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            match c {
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                    if i != 0 {
                        self.structural = true;
                    }

                    compound_start = true;
                    i += 1;
                    continue;
                }
                // A namespace prefix, like `svg|rect`.
                '|' => {
                    compound_start = true;
                    i += 1;
                    continue;
                }
                '*' => {
                    self.universal = true;
                    i += 1;
                }
                '[' => {
                    self.attributes = true;
                    while i < chars.len() && chars[i] != ']' {
                        i += 1;
                    }
                    i += 1;
                }
                '.' | '#' | ':' => {
                    if c == ':' {
                        self.structural = true;
                    }

                    i += 1;
                    while i < chars.len() && is_ident_char(chars[i]) {
                        i += 1;
                    }

                    if i < chars.len() && chars[i] == '(' {
                        while i < chars.len() && chars[i] != ')' {
                            i += 1;
                        }
                        i += 1;
                    }
                }
                c if compound_start && is_ident_char(c) => {
                    let start = i;
                    while i < chars.len() && is_ident_char(chars[i]) {
                        i += 1;
                    }
                    self.types.insert(chars[start..i].iter().collect());
                }
                _ => i += 1,
            }

            compound_start = false;
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn strip_css_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(css: &str) -> SelectorUsage {
        let mut usage = SelectorUsage::default();
        usage.scan_sheet(css);
        usage
    }

    #[test]
    fn selector_usage() {
        let u = usage(".a{fill:red} #b , rect.c{fill:blue}/* g{} */");
        assert!(u.selects_type("rect"));
        assert!(!u.selects_type("g"));
        assert!(!u.selects_type("a"));
        assert!(!u.is_structural());

        let u = usage("@media screen{g>path:first-child{fill:red}}");
        assert!(u.selects_type("g"));
        assert!(u.selects_type("path"));
        assert!(!u.selects_type("screen"));
        assert!(u.is_structural());

        assert!(usage("*{fill:red}").is_structural());
        assert!(usage(".a .b{fill:red}").is_structural());
        assert!(usage("[x='1']{fill:red}").is_structural());
    }

    #[test]
    fn urls() {
        assert_eq!(url_references("url(#a)"), ["a"]);
        assert_eq!(url_references("fill:url( '#b' );stroke:url(#c)"), ["b", "c"]);
        assert!(url_references("url(image.png)").is_empty());
    }
}
