// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::prelude::*;

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Animations can reference ids via `begin="id.end"`, which we do not track.
const ANIMATION_ELEMENTS: &[&str] = &["animate", "animateColor", "animateMotion", "animateTransform", "set"];

/// Removes unused ids and shortens used ones.
pub fn cleanup_ids(doc: &mut Document) {
    if has_scripts(doc) || has_style_sheet(doc) {
        return;
    }

    let has_animations = doc
        .elements()
        .into_iter()
        .any(|id| doc.element(id).map(|e| is_one_of(&e.name, ANIMATION_ELEMENTS)) == Some(true));
    if has_animations {
        return;
    }

    let references = collect_references(doc);

    let mut renames = HashMap::new();
    let mut counter = 0;
    for id in doc.elements() {
        let e = match doc.element_mut(id) {
            Some(e) => e,
            None => continue,
        };

        let old = match e.attribute("id") {
            Some(v) => v.to_string(),
            None => continue,
        };

        if !references.contains(&old) {
            e.remove_attribute("id");
            continue;
        }

        // A duplicated id. Only the first one is referenced.
        if renames.contains_key(&old) {
            e.remove_attribute("id");
            continue;
        }

        let new = generate_id(counter);
        counter += 1;
        e.set_attribute("id", new.clone());
        renames.insert(old, new);
    }

    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            for attr in &mut e.attributes {
                if is_href_attribute(&attr.name) {
                    if let Some(new) = href_reference(&attr.value).and_then(|v| renames.get(v)) {
                        attr.value = format!("#{}", new);
                    }
                } else if attr.value.contains("url(") {
                    attr.value = replace_url_references(&attr.value, &renames);
                }
            }
        }
    }
}

fn generate_id(mut n: usize) -> String {
    let mut id = Vec::new();
    loop {
        id.push(ID_CHARS[n % ID_CHARS.len()]);
        n /= ID_CHARS.len();
        if n == 0 {
            break;
        }
        n -= 1;
    }

    id.reverse();
    String::from_utf8_lossy(&id).to_string()
}

/// Replaces ids inside `url(#id)` using a map.
pub fn replace_url_references(value: &str, map: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("url(") {
        out.push_str(&rest[..start + 4]);
        rest = &rest[start + 4..];
        let end = match rest.find(')') {
            Some(v) => v,
            None => break,
        };

        let inner = rest[..end].trim().trim_matches(|c| c == '"' || c == '\'');
        match inner.strip_prefix('#').and_then(|id| map.get(id)) {
            Some(new) => out.push_str(&format!("#{}", new)),
            None => out.push_str(&rest[..end]),
        }

        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn ids() {
        assert_eq!(generate_id(0), "a");
        assert_eq!(generate_id(51), "Z");
        assert_eq!(generate_id(52), "aa");
        assert_eq!(generate_id(53), "ab");
    }

    #[test]
    fn references_are_updated() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>\
             <linearGradient id='gradient'/><path id='unused' fill='url(&quot;#gradient&quot;)'/>\
             <use xlink:href='#gradient'/></svg>",
        )
        .unwrap();
        cleanup_ids(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\
             <linearGradient id=\"a\"/><path fill=\"url(#a)\"/><use xlink:href=\"#a\"/></svg>"
        );
    }

    #[test]
    fn scripts_disable_the_plugin() {
        let text = "<svg xmlns=\"http://www.w3.org/2000/svg\"><script>x()</script><rect id=\"r\"/></svg>";
        let mut doc = Document::parse(text).unwrap();
        cleanup_ids(&mut doc);
        assert_eq!(doc.to_string(&WriteOptions::default()), text);
    }
}
