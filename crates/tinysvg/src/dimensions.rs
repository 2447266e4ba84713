// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SVG size detection.

use std::sync::OnceLock;

use base64::Engine;
use regex::Regex;
use svgtidy::numbers::parse_leading_number;
use svgtidy::{Document, WriteOptions};

use crate::source::BASE64_DATA_URI_PREFIX;

/// The default thumbnail size.
pub const THUMBNAIL_SIZE: f64 = 200.0;

/// The size of the root `svg` element.
#[derive(Clone, PartialEq, Debug)]
pub struct Dimensions {
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
    /// The raw `viewBox` value.
    pub view_box: Option<String>,
}

/// A parsed `viewBox`.
///
/// Unparsable numbers are stored as zeros.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBox {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub width: f64,
    #[allow(missing_docs)]
    pub height: f64,
}

impl ViewBox {
    /// Parses a `viewBox` separated by whitespaces or commas.
    ///
    /// Returns `None` when there are not exactly four values.
    /// Note that a comma followed by a space produces an empty value.
    pub fn parse(text: &str) -> Option<Self> {
        let values: Vec<f64> = view_box_values(text)?
            .into_iter()
            .map(|v| parse_leading_number(v).unwrap_or(0.0))
            .collect();

        Some(ViewBox {
            x: values[0],
            y: values[1],
            width: values[2],
            height: values[3],
        })
    }
}

/// Splits a `viewBox` into exactly four raw values.
pub fn view_box_values(text: &str) -> Option<Vec<&str>> {
    let values: Vec<&str> = view_box_separator().split(text).collect();
    if values.len() == 4 {
        Some(values)
    } else {
        None
    }
}

fn view_box_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `unwrap` is safe, because the pattern is valid.
    RE.get_or_init(|| Regex::new(r"\s+|,").unwrap())
}

/// Returns the size of the root `svg` element.
///
/// `width` and `height` are used when both are set, otherwise the `viewBox` size.
/// Units are ignored. Returns `None` when the text is not an SVG.
pub fn svg_dimensions(text: &str) -> Option<Dimensions> {
    let doc = Document::parse(text).ok()?;
    Some(root_dimensions(&doc))
}

pub(crate) fn root_dimensions(doc: &Document) -> Dimensions {
    let svg = doc.root_element();
    let width_attr = doc.attribute(svg, "width").filter(|s| !s.is_empty());
    let height_attr = doc.attribute(svg, "height").filter(|s| !s.is_empty());
    let view_box = doc
        .attribute(svg, "viewBox")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let mut width = 0.0;
    let mut height = 0.0;
    if let (Some(w), Some(h)) = (width_attr, height_attr) {
        width = parse_leading_number(w).unwrap_or(0.0);
        height = parse_leading_number(h).unwrap_or(0.0);
    } else if let Some(vb) = view_box.as_deref().and_then(ViewBox::parse) {
        width = vb.width;
        height = vb.height;
    }

    Dimensions {
        width,
        height,
        view_box,
    }
}

/// Returns the content size, preferring the `viewBox`.
///
/// Unlike [`svg_dimensions`], returns `None` when either side is zero.
pub fn content_dimensions(text: &str) -> Option<(f64, f64)> {
    let doc = Document::parse(text).ok()?;
    let svg = doc.root_element();

    if let Some((w, h)) = doc.attribute(svg, "viewBox").and_then(space_separated_size) {
        if w != 0.0 && h != 0.0 {
            return Some((w, h));
        }
    }

    let w = doc.attribute(svg, "width").and_then(parse_leading_number).unwrap_or(0.0);
    let h = doc.attribute(svg, "height").and_then(parse_leading_number).unwrap_or(0.0);
    if w != 0.0 && h != 0.0 {
        Some((w, h))
    } else {
        None
    }
}

// Thumbnails split `viewBox` only by single spaces and require plain numbers.
fn space_separated_size(view_box: &str) -> Option<(f64, f64)> {
    let parse = |s: &str| -> f64 {
        if s.is_empty() {
            0.0
        } else {
            s.parse().unwrap_or(0.0)
        }
    };

    let parts: Vec<&str> = view_box.split(' ').collect();
    let w = parse(parts.get(2)?);
    let h = parse(parts.get(3)?);
    Some((w, h))
}

/// A side changed by a user.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Side {
    #[allow(missing_docs)]
    Width,
    #[allow(missing_docs)]
    Height,
}

/// Calculates a new size with the same aspect ratio.
///
/// The side that was not changed is rounded.
pub fn proportional_dimensions(
    original_width: f64,
    original_height: f64,
    new_value: f64,
    changed: Side,
) -> (f64, f64) {
    let aspect_ratio = original_width / original_height;
    match changed {
        Side::Width => (new_value, (new_value / aspect_ratio).round()),
        Side::Height => ((new_value * aspect_ratio).round(), new_value),
    }
}

/// Creates a base64 data URI of an SVG that fits into `max_size`.
///
/// The aspect ratio is taken from the `viewBox`. Without it, the thumbnail is square.
/// Input that is not an SVG is returned as is.
pub fn thumbnail(text: &str, max_size: f64) -> String {
    let engine = base64::engine::general_purpose::STANDARD;
    let mut doc = match Document::parse(text) {
        Ok(doc) => doc,
        Err(_) => return text.to_string(),
    };

    let svg = doc.root_element();
    let size = doc
        .attribute(svg, "viewBox")
        .and_then(space_separated_size)
        .filter(|(w, h)| *w != 0.0 && *h != 0.0);

    let (width, height) = match size {
        Some((w, h)) => {
            let aspect_ratio = w / h;
            if aspect_ratio > 1.0 {
                (max_size, max_size / aspect_ratio)
            } else {
                (max_size * aspect_ratio, max_size)
            }
        }
        None => (max_size, max_size),
    };

    if let Some(e) = doc.element_mut(svg) {
        e.set_attribute("width", number_to_string(width));
        e.set_attribute("height", number_to_string(height));
    }

    let data = doc.to_string(&WriteOptions::default());
    format!("{}{}", BASE64_DATA_URI_PREFIX, engine.encode(data))
}

/// Writes a number in the shortest round-trip form, without a trailing `.0`.
pub(crate) fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        // Also handles `-0`.
        "0".to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_from_attributes() {
        let d = svg_dimensions("<svg xmlns='http://www.w3.org/2000/svg' width='32px' height='16'/>").unwrap();
        assert_eq!((d.width, d.height), (32.0, 16.0));
        assert_eq!(d.view_box, None);
    }

    #[test]
    fn size_from_view_box() {
        let d = svg_dimensions("<svg xmlns='http://www.w3.org/2000/svg' width='32' viewBox='0,0,24,12'/>")
            .unwrap();
        assert_eq!((d.width, d.height), (24.0, 12.0));
        assert_eq!(d.view_box.as_deref(), Some("0,0,24,12"));
    }

    #[test]
    fn no_size() {
        let d = svg_dimensions("<svg xmlns='http://www.w3.org/2000/svg' viewBox='0, 0, 24, 12'/>").unwrap();
        assert_eq!((d.width, d.height), (0.0, 0.0));
        assert!(svg_dimensions("<html/>").is_none());
        assert!(svg_dimensions("not xml").is_none());
    }

    #[test]
    fn view_box() {
        assert_eq!(
            ViewBox::parse("-5 10.5 20 30"),
            Some(ViewBox { x: -5.0, y: 10.5, width: 20.0, height: 30.0 })
        );
        assert_eq!(ViewBox::parse("0 0 20"), None);
    }

    #[test]
    fn content_size() {
        assert_eq!(
            content_dimensions("<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 10 20' width='5' height='5'/>"),
            Some((10.0, 20.0))
        );
        assert_eq!(
            content_dimensions("<svg xmlns='http://www.w3.org/2000/svg' width='5' height='6'/>"),
            Some((5.0, 6.0))
        );
        assert_eq!(content_dimensions("<svg xmlns='http://www.w3.org/2000/svg' width='5'/>"), None);
    }

    #[test]
    fn proportional() {
        assert_eq!(proportional_dimensions(200.0, 100.0, 50.0, Side::Width), (50.0, 25.0));
        assert_eq!(proportional_dimensions(200.0, 100.0, 33.0, Side::Height), (66.0, 33.0));
        assert_eq!(proportional_dimensions(3.0, 2.0, 5.0, Side::Width), (5.0, 3.0));
    }

    #[test]
    fn thumbnails() {
        let uri = thumbnail("<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 40 20'/>", 200.0);
        let data = uri.strip_prefix(BASE64_DATA_URI_PREFIX).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(data).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 40 20\" width=\"200\" height=\"100\"/>"
        );
    }

    #[test]
    fn invalid_thumbnail() {
        assert_eq!(thumbnail("<html/>", 200.0), "<html/>");
        assert_eq!(thumbnail("<svg", 200.0), "<svg");
    }

    #[test]
    fn numbers() {
        assert_eq!(number_to_string(24.0), "24");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(133.33333333333334), "133.33333333333334");
    }
}
