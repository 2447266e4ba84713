// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Attribute, Document, Element, NodeId, NodeKind, SVG_NS, XLINK_NS};
use crate::Error;

const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

// Whitespace-only text is meaningful only inside these elements.
const TEXT_CONTENT_ELEMENTS: &[&str] = &["text", "tspan", "textPath", "tref", "title", "desc"];

pub(crate) fn parse(text: &str) -> Result<Document, Error> {
    let opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(text, opt)?;

    let mut doc = Document::new();
    let (declaration, doctype) = scan_prolog(text);
    doc.declaration = declaration;
    doc.doctype = doctype;

    let root_id = doc.root();
    parse_xml_children(xml.root(), root_id, &mut doc)?;

    let svg = doc
        .children(root_id)
        .iter()
        .copied()
        .find(|id| doc.is_element(*id))
        .ok_or(Error::NotAnSvg)?;

    let root_xml = xml.root_element();
    // Markup copied from HTML often has no namespace at all.
    let ns = root_xml.tag_name().namespace();
    if !matches!(ns, None | Some(SVG_NS)) || root_xml.tag_name().name() != "svg" {
        return Err(Error::NotAnSvg);
    }

    // SVG elements are always written without a prefix,
    // so the default namespace must be declared on the root.
    if let Some(e) = doc.element_mut(svg) {
        if !e.has_attribute("xmlns") {
            e.attributes.insert(0, Attribute {
                name: "xmlns".to_string(),
                value: SVG_NS.to_string(),
            });
        }

        let uses_xlink = xml.descendants().any(|n| {
            n.attributes().any(|a| a.namespace() == Some(XLINK_NS))
        });
        if uses_xlink && !e.has_attribute("xmlns:xlink") {
            e.set_attribute("xmlns:xlink", XLINK_NS);
        }
    }

    Ok(doc)
}

fn parse_xml_children(
    parent: roxmltree::Node,
    parent_id: NodeId,
    doc: &mut Document,
) -> Result<(), Error> {
    for node in parent.children() {
        parse_xml_node(node, parent_id, doc)?;
    }

    Ok(())
}

fn parse_xml_node(node: roxmltree::Node, parent_id: NodeId, doc: &mut Document) -> Result<(), Error> {
    if doc.nodes_count() > 1_000_000 {
        return Err(Error::ElementsLimitReached);
    }

    match node.node_type() {
        roxmltree::NodeType::Root => {}
        roxmltree::NodeType::Element => {
            let element = parse_element(node);
            let id = doc.append(parent_id, NodeKind::Element(element));
            parse_xml_children(node, id, doc)?;
        }
        roxmltree::NodeType::Text => {
            let text = node.text().unwrap_or_default();
            let keep_spaces = doc
                .element(parent_id)
                .map(|e| TEXT_CONTENT_ELEMENTS.contains(&e.name.as_str()))
                .unwrap_or(false);
            if keep_spaces || !text.trim().is_empty() {
                doc.append(parent_id, NodeKind::Text(text.to_string()));
            }
        }
        roxmltree::NodeType::Comment => {
            let text = node.text().unwrap_or_default();
            doc.append(parent_id, NodeKind::Comment(text.to_string()));
        }
        roxmltree::NodeType::PI => {
            if let Some(pi) = node.pi() {
                doc.append(parent_id, NodeKind::ProcessingInstruction {
                    target: pi.target.to_string(),
                    value: pi.value.map(|s| s.to_string()),
                });
            }
        }
    }

    Ok(())
}

fn parse_element(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name());
    let mut element = Element {
        name,
        attributes: Vec::new(),
    };

    // Only the namespaces declared on this very element.
    let parent = node.parent_element();
    for ns in node.namespaces() {
        let inherited = parent
            .map(|p| p.namespaces().any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri()))
            .unwrap_or(false);
        if inherited || ns.uri() == XML_NAMESPACE_NS {
            continue;
        }

        let name = match ns.name() {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };

        element.attributes.push(Attribute {
            name,
            value: ns.uri().to_string(),
        });
    }

    for attr in node.attributes() {
        let name = match attr.namespace() {
            None => attr.name().to_string(),
            Some(XML_NAMESPACE_NS) => format!("xml:{}", attr.name()),
            Some(XLINK_NS) => format!("xlink:{}", attr.name()),
            Some(uri) => match node.lookup_prefix(uri) {
                Some(prefix) => format!("{}:{}", prefix, attr.name()),
                None => attr.name().to_string(),
            },
        };

        element.attributes.push(Attribute {
            name,
            value: attr.value().to_string(),
        });
    }

    element
}

fn qualified_name(node: roxmltree::Node, ns: Option<&str>, local: &str) -> String {
    match ns {
        None | Some(SVG_NS) => local.to_string(),
        Some(uri) => match node.lookup_prefix(uri) {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
            _ => local.to_string(),
        },
    }
}

/// Extracts the XML declaration and the DOCTYPE text,
/// which are not preserved by the XML parser.
fn scan_prolog(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim_start_matches('\u{feff}');
    let root_start = find_root_start(text);
    let prolog = &text[..root_start];

    let declaration = prolog.trim_start().strip_prefix("<?xml").and_then(|rest| {
        if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
            return None;
        }

        let end = rest.find("?>")?;
        Some(format!("<?xml{}?>", &rest[..end]))
    });

    let doctype = prolog.find("<!DOCTYPE").and_then(|start| {
        let mut depth = 0;
        for (i, c) in prolog[start..].char_indices() {
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                '>' if depth == 0 => return Some(prolog[start..start + i + 1].to_string()),
                _ => {}
            }
        }

        None
    });

    (declaration, doctype)
}

// The first `<` that starts an element, skipping comments, PIs and a DOCTYPE.
fn find_root_start(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let rest = &text[i..];
        let skip_to = if rest.starts_with("<?") {
            rest.find("?>").map(|p| p + 2)
        } else if rest.starts_with("<!--") {
            rest.find("-->").map(|p| p + 3)
        } else if rest.starts_with("<!") {
            let mut depth = 0;
            rest.char_indices()
                .find(|&(_, c)| {
                    match c {
                        '[' => depth += 1,
                        ']' => depth -= 1,
                        '>' if depth == 0 => return true,
                        _ => {}
                    }
                    false
                })
                .map(|(p, _)| p + 1)
        } else {
            return i;
        };

        match skip_to {
            Some(n) => i += n,
            None => return text.len(),
        }
    }

    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prolog_is_preserved() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                    <!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"x.dtd\" [<!ENTITY a \"b\">]>\n\
                    <svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        let (decl, doctype) = scan_prolog(text);
        assert_eq!(decl.as_deref(), Some("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(
            doctype.as_deref(),
            Some("<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"x.dtd\" [<!ENTITY a \"b\">]>")
        );
    }

    #[test]
    fn not_an_svg() {
        let res = parse("<html xmlns='http://www.w3.org/1999/xhtml'/>");
        assert!(matches!(res, Err(Error::NotAnSvg)));
    }

    #[test]
    fn missing_namespace_is_added() {
        let doc = parse("<svg width='10'/>").unwrap();
        let svg = doc.element(doc.root_element()).unwrap();
        assert_eq!(svg.attribute("xmlns"), Some(SVG_NS));
        assert_eq!(svg.attribute("width"), Some("10"));
    }

    #[test]
    fn editor_prefixes_are_kept() {
        let doc = parse(
            "<svg xmlns='http://www.w3.org/2000/svg' \
                  xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape' \
                  inkscape:version='1.0'><inkscape:grid/></svg>",
        )
        .unwrap();
        let svg = doc.element(doc.root_element()).unwrap();
        assert_eq!(svg.attribute("inkscape:version"), Some("1.0"));
        assert!(svg.has_attribute("xmlns:inkscape"));
        let grid = doc.children(doc.root_element())[0];
        assert_eq!(doc.element(grid).unwrap().name, "inkscape:grid");
    }
}
