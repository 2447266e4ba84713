// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::prelude::*;

const COLOR_ATTRIBUTES: &[&str] = &["color", "fill", "flood-color", "lighting-color", "stop-color", "stroke"];

// Named colors that are shorter than their hex form.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("#000080", "navy"), ("#008000", "green"), ("#008080", "teal"), ("#4b0082", "indigo"),
    ("#800000", "maroon"), ("#800080", "purple"), ("#808000", "olive"), ("#808080", "gray"),
    ("#a0522d", "sienna"), ("#a52a2a", "brown"), ("#c0c0c0", "silver"), ("#cd853f", "peru"),
    ("#d2b48c", "tan"), ("#da70d6", "orchid"), ("#dda0dd", "plum"), ("#ee82ee", "violet"),
    ("#f00", "red"), ("#f0e68c", "khaki"), ("#f0ffff", "azure"), ("#f5deb3", "wheat"),
    ("#f5f5dc", "beige"), ("#fa8072", "salmon"), ("#faf0e6", "linen"), ("#ff6347", "tomato"),
    ("#ff7f50", "coral"), ("#ffa500", "orange"), ("#ffc0cb", "pink"), ("#ffd700", "gold"),
    ("#ffe4c4", "bisque"), ("#fffafa", "snow"), ("#fffff0", "ivory"),
];

/// Converts colors to the shortest notation.
pub fn convert_colors(doc: &mut Document) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            for attr in &mut e.attributes {
                if !is_one_of(&attr.name, COLOR_ATTRIBUTES) {
                    continue;
                }

                if let Some(color) = shortest_color(&attr.value) {
                    attr.value = color;
                }
            }
        }
    }
}

/// Returns the shortest notation for a solid color.
pub fn shortest_color(value: &str) -> Option<String> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("url(") || matches!(lower.as_str(), "none" | "currentcolor" | "inherit" | "transparent") {
        return None;
    }

    let color = svgtypes::Color::from_str(value).ok()?;
    if color.alpha != 255 {
        return None;
    }

    let mut hex = format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue);
    let b = hex.as_bytes();
    if b[1] == b[2] && b[3] == b[4] && b[5] == b[6] {
        hex = format!("#{}{}{}", b[1] as char, b[3] as char, b[5] as char);
    }

    let short = SHORT_NAMES
        .iter()
        .find(|(h, _)| *h == hex)
        .map(|(_, name)| name.to_string())
        .unwrap_or(hex);

    if short.len() <= value.len() {
        Some(short)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors() {
        assert_eq!(shortest_color("#FF0000").as_deref(), Some("red"));
        assert_eq!(shortest_color("rgb(255, 255, 255)").as_deref(), Some("#fff"));
        assert_eq!(shortest_color("black").as_deref(), Some("#000"));
        assert_eq!(shortest_color("#123456").as_deref(), Some("#123456"));
        assert_eq!(shortest_color("rgba(0,0,0,.5)"), None);
        assert_eq!(shortest_color("url(#a)"), None);
        assert_eq!(shortest_color("currentColor"), None);
    }
}
