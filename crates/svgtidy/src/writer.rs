// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use xmlwriter::XmlWriter;

use crate::tree::{Document, NodeId, NodeKind};

pub use xmlwriter::Indent;

impl Document {
    /// Writes the document back to SVG.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        convert(self, opt)
    }

    /// Writes element children only, like the DOM `innerHTML`.
    pub fn inner_markup(&self, id: NodeId, opt: &WriteOptions) -> String {
        let mut xml = XmlWriter::new(xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: opt.indent,
            attributes_indent: opt.attributes_indent,
        });
        write_node(self, id, &mut xml);
        let s = xml.end_document();
        let inner = strip_outer_element(&s);

        let level = match opt.indent {
            Indent::None => return inner.to_string(),
            Indent::Spaces(n) => " ".repeat(n as usize),
            Indent::Tabs => "\t".to_string(),
        };

        inner
            .trim_matches('\n')
            .lines()
            .map(|line| line.strip_prefix(level.as_str()).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct WriteOptions {
    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: `None`
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            use_single_quote: false,
            indent: Indent::None,
            attributes_indent: Indent::None,
        }
    }
}

impl WriteOptions {
    /// Options for a human-readable output.
    pub fn pretty() -> Self {
        Self {
            indent: Indent::Spaces(2),
            ..Self::default()
        }
    }
}

fn convert(doc: &Document, opt: &WriteOptions) -> String {
    let newline = if matches!(opt.indent, Indent::None) { "" } else { "\n" };
    let root_element = doc.root_element();

    let mut out = String::new();
    if let Some(ref decl) = doc.declaration {
        out.push_str(decl);
        out.push_str(newline);
    }

    if let Some(ref doctype) = doc.doctype {
        out.push_str(doctype);
        out.push_str(newline);
    }

    let mut after_root = false;
    let mut tail = String::new();
    for child in doc.children(doc.root()) {
        if *child == root_element {
            let mut xml = XmlWriter::new(xmlwriter::Options {
                use_single_quote: opt.use_single_quote,
                indent: opt.indent,
                attributes_indent: opt.attributes_indent,
            });
            write_node(doc, root_element, &mut xml);
            out.push_str(xml.end_document().trim_end_matches('\n'));
            after_root = true;
            continue;
        }

        let s = if after_root { &mut tail } else { &mut out };
        match doc.kind(*child) {
            NodeKind::Comment(ref text) => {
                s.push_str(&format!("<!--{}-->", text));
            }
            NodeKind::ProcessingInstruction { ref target, ref value } => {
                match value {
                    Some(value) => s.push_str(&format!("<?{} {}?>", target, value)),
                    None => s.push_str(&format!("<?{}?>", target)),
                }
            }
            _ => continue,
        }

        if !after_root {
            s.push_str(newline);
        }
    }

    if !tail.is_empty() {
        out.push_str(newline);
        out.push_str(&tail);
    }

    out
}

fn write_node(doc: &Document, id: NodeId, xml: &mut XmlWriter) {
    match doc.kind(id) {
        NodeKind::Element(ref e) => {
            xml.start_element(&e.name);
            for attr in &e.attributes {
                xml.write_attribute(&attr.name, &attr.value);
            }

            let has_text = doc
                .children(id)
                .iter()
                .any(|c| matches!(doc.kind(*c), NodeKind::Text(_)));
            if has_text {
                xml.set_preserve_whitespaces(true);
            }

            for child in doc.children(id) {
                write_node(doc, *child, xml);
            }

            xml.end_element();

            if has_text {
                xml.set_preserve_whitespaces(false);
            }
        }
        NodeKind::Text(ref text) => {
            xml.write_text(text);
        }
        NodeKind::Comment(ref text) => {
            xml.write_comment(text);
        }
        NodeKind::ProcessingInstruction { ref target, .. } => {
            log::warn!("Processing instruction '{}' inside an element is not supported.", target);
        }
        NodeKind::Root => {
            for child in doc.children(id) {
                write_node(doc, *child, xml);
            }
        }
    }
}

// `<svg a="1">inner</svg>` -> `inner`
fn strip_outer_element(s: &str) -> &str {
    let mut quote = None;
    let mut start_end = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (None, '"') | (None, '\'') => quote = Some(c),
            (Some(q), c) if q == c => quote = None,
            (None, '>') => {
                start_end = Some(i);
                break;
            }
            _ => {}
        }
    }

    let start_end = match start_end {
        Some(v) => v,
        None => return "",
    };

    // A self-closing element has no content.
    if s[..start_end].ends_with('/') {
        return "";
    }

    let inner = &s[start_end + 1..];
    match inner.rfind("</") {
        Some(end) => &inner[..end],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_outer() {
        assert_eq!(strip_outer_element("<svg a=\"x>y\"><rect/></svg>"), "<rect/>");
        assert_eq!(strip_outer_element("<svg a=\"1\"/>"), "");
    }

    #[test]
    fn inner_markup() {
        let doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 1 1'>\n  <path d='M0 0'/>\n</svg>",
        )
        .unwrap();
        let svg = doc.root_element();
        assert_eq!(doc.inner_markup(svg, &WriteOptions::default()), "<path d=\"M0 0\"/>");
        assert_eq!(doc.inner_markup(svg, &WriteOptions::pretty()), "<path d=\"M0 0\"/>");
    }

    #[test]
    fn compact_output() {
        let text = "<?xml version=\"1.0\"?>\n<!-- c -->\n<svg xmlns=\"http://www.w3.org/2000/svg\">\n    <g>\n        <rect width=\"1\"/>\n    </g>\n</svg>";
        let doc = Document::parse(text).unwrap();
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<?xml version=\"1.0\"?><!-- c --><svg xmlns=\"http://www.w3.org/2000/svg\"><g><rect width=\"1\"/></g></svg>"
        );
    }
}
