// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

pub fn remove_elements(doc: &mut Document, names: &[&str]) {
    let count = doc.remove_all(|doc, id| {
        doc.element(id).map(|e| is_one_of(&e.name, names)) == Some(true)
    });

    if count != 0 {
        log::debug!("Removed {} {:?} element(s).", count, names);
    }
}

/// Removes `desc` elements that are empty or were generated by an editor.
pub fn remove_desc(doc: &mut Document) {
    doc.remove_all(|doc, id| {
        if !doc.is_tag(id, "desc") {
            return false;
        }

        let text = doc.text_content(id);
        let text = text.trim();
        text.is_empty() || text.starts_with("Created with") || text.starts_with("Created using")
    });
}

pub fn remove_script_element(doc: &mut Document) {
    remove_elements(doc, &["script"]);

    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            e.attributes.retain(|a| !is_event_attribute(&a.name));

            let is_js = e.href().map(|h| h.trim_start().starts_with("javascript:")) == Some(true);
            if is_js {
                e.remove_attribute("href");
                e.remove_attribute("xlink:href");
            }
        }
    }

    // Links without a target become simple groups.
    for id in doc.elements() {
        if doc.is_tag(id, "a") && doc.element(id).and_then(|e| e.href()).is_none() {
            doc.ungroup(id);
        }
    }
}

pub fn remove_raster_images(doc: &mut Document) {
    doc.remove_all(|doc, id| {
        if !doc.is_tag(id, "image") {
            return false;
        }

        match doc.element(id).and_then(|e| e.href()) {
            Some(href) => is_raster_href(href),
            None => false,
        }
    });
}

fn is_raster_href(href: &str) -> bool {
    let href = href.trim().to_ascii_lowercase();
    if href.starts_with("data:image/png")
        || href.starts_with("data:image/jpeg")
        || href.starts_with("data:image/jpg")
        || href.starts_with("data:image/gif")
        || href.starts_with("data:image/webp")
    {
        return true;
    }

    [".png", ".jpg", ".jpeg", ".gif", ".webp"]
        .iter()
        .any(|ext| href.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn scripts_and_handlers() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><script>alert(1)</script>\
             <a href='javascript:void(0)'><rect onclick='x()' width='1'/></a></svg>",
        )
        .unwrap();
        remove_script_element(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><rect width=\"1\"/></svg>"
        );
    }

    #[test]
    fn raster_detection() {
        assert!(is_raster_href("data:image/png;base64,AAAA"));
        assert!(is_raster_href("photo.JPG"));
        assert!(!is_raster_href("icon.svg"));
    }
}
