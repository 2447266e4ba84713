// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

/// Merges all `style` elements into the first one.
pub fn merge_styles(doc: &mut Document) {
    let styles: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|id| doc.is_tag(*id, "style"))
        .filter(|id| matches!(doc.attribute(*id, "type"), None | Some("") | Some("text/css")))
        .collect();

    let mut iter = styles.iter();
    let first = match iter.next() {
        Some(v) => *v,
        None => return,
    };

    let mut css = String::new();
    for id in &styles {
        let text = doc.text_content(*id);
        if text.trim().is_empty() {
            continue;
        }

        match doc.attribute(*id, "media") {
            Some(media) if !media.trim().is_empty() => {
                css.push_str(&format!("@media {}{{{}}}", media.trim(), text));
            }
            _ => css.push_str(&text),
        }
    }

    for id in iter {
        doc.detach(*id);
    }

    if css.trim().is_empty() {
        doc.detach(first);
        return;
    }

    if let Some(e) = doc.element_mut(first) {
        e.remove_attribute("media");
    }

    set_text(doc, first, css);
}

/// Minifies `style` elements and `style` attributes.
pub fn minify_styles(doc: &mut Document) {
    for id in doc.elements() {
        if doc.is_tag(id, "style") {
            let css = minify_css(&doc.text_content(id));
            if css.is_empty() {
                doc.detach(id);
            } else {
                set_text(doc, id, css);
            }
        }

        if let Some(e) = doc.element_mut(id) {
            if let Some(style) = e.attribute("style") {
                let style = minify_declarations(style);
                if style.is_empty() {
                    e.remove_attribute("style");
                } else {
                    e.set_attribute("style", style);
                }
            }
        }
    }
}

fn set_text(doc: &mut Document, id: NodeId, text: String) {
    for child in doc.children(id).to_vec() {
        doc.detach(child);
    }

    doc.append(id, NodeKind::Text(text));
}

/// Rebuilds a declaration list in the shortest form.
pub fn minify_declarations(style: &str) -> String {
    let mut list = Vec::new();
    for d in simplecss::DeclarationTokenizer::from(style) {
        let value = minify_css(d.value);
        if d.important {
            list.push(format!("{}:{}!important", d.name, value));
        } else {
            list.push(format!("{}:{}", d.name, value));
        }
    }

    list.join(";")
}

/// Removes comments and insignificant whitespaces from CSS.
pub fn minify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut quote: Option<char> = None;
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else if c == q {
                quote = None;
            }

            continue;
        }

        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                // A comment still separates tokens.
                pending_space = true;
            }
            c if c.is_whitespace() => pending_space = true,
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space);
                quote = Some(c);
                out.push(c);
            }
            '{' | '}' | ';' | ':' | ',' | '>' | '~' | '!' | ')' => {
                pending_space = false;
                if c == '}' && out.ends_with(';') {
                    out.pop();
                }
                out.push(c);
            }
            _ => {
                flush_space(&mut out, &mut pending_space);
                out.push(c);
            }
        }
    }

    if out.ends_with(';') {
        out.pop();
    }

    out.trim().to_string()
}

fn flush_space(out: &mut String, pending: &mut bool) {
    if *pending {
        let prev = out.chars().last();
        let is_tight = matches!(prev, None | Some('{' | '}' | ';' | ':' | ',' | '>' | '~' | '!' | '('));
        if !is_tight {
            out.push(' ');
        }
    }

    *pending = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn css() {
        assert_eq!(
            minify_css("/* c */ .a , g > path {\n  fill : red ;\n  stroke: url( #b );\n}\n"),
            ".a,g>path{fill:red;stroke:url(#b)}"
        );
        assert_eq!(minify_css("text { font-family: 'A  B' }"), "text{font-family:'A  B'}");
    }

    #[test]
    fn declarations() {
        assert_eq!(minify_declarations(" fill: red ; opacity:.5 !important;"), "fill:red;opacity:.5!important");
    }

    #[test]
    fn merge() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><style>.a{fill:red}</style>\
             <style media='print'>.b{fill:blue}</style><style/></svg>",
        )
        .unwrap();
        merge_styles(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><style>.a{fill:red}@media print{.b{fill:blue}}</style></svg>"
        );
    }
}
