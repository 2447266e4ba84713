// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit};

use super::prelude::*;

const NUMERIC_ATTRIBUTES: &[&str] = &[
    "cx", "cy", "dx", "dy", "flood-opacity", "font-size", "fill-opacity", "fr", "fx", "fy",
    "height", "k1", "k2", "k3", "k4", "letter-spacing", "markerHeight", "markerWidth",
    "offset", "opacity", "r", "refX", "refY", "rx", "ry", "scale", "stdDeviation",
    "stop-opacity", "stroke-dashoffset", "stroke-miterlimit", "stroke-opacity",
    "stroke-width", "surfaceScale", "width", "word-spacing", "x", "x1", "x2", "y", "y1", "y2",
];

const LIST_ATTRIBUTES: &[&str] = &[
    "baseFrequency", "dx", "dy", "kernelMatrix", "points", "rotate", "stdDeviation",
    "stroke-dasharray", "tableValues", "viewBox", "x", "y",
];

/// Rounds numeric values and removes the default `px` units.
pub fn cleanup_numeric_values(doc: &mut Document, opt: &Options) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            for attr in &mut e.attributes {
                if attr.name == "viewBox" {
                    if let Some(v) = round_list(&attr.value, opt.float_precision) {
                        attr.value = v;
                    }
                } else if is_one_of(&attr.name, NUMERIC_ATTRIBUTES) {
                    if let Ok(length) = Length::from_str(&attr.value) {
                        attr.value = format_length(length, opt.float_precision);
                    }
                }
            }
        }
    }
}

/// Rounds values in number and length lists.
pub fn cleanup_list_of_values(doc: &mut Document, opt: &Options) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            for attr in &mut e.attributes {
                if !is_one_of(&attr.name, LIST_ATTRIBUTES) {
                    continue;
                }

                if let Some(v) = round_list(&attr.value, opt.float_precision) {
                    attr.value = v;
                }
            }
        }
    }
}

fn round_list(value: &str, precision: u8) -> Option<String> {
    let mut list = Vec::new();
    for length in svgtypes::LengthListParser::from(value) {
        list.push(format_length(length.ok()?, precision));
    }

    if list.is_empty() {
        return None;
    }

    Some(list.join(" "))
}

/// Formats a length in the shortest form.
///
/// Absolute units are converted to pixels when it makes the value shorter.
pub fn format_length(length: Length, precision: u8) -> String {
    let original = format!("{}{}", format_number(length.number, precision), unit_str(length.unit));

    let px_factor = match length.unit {
        LengthUnit::Px | LengthUnit::None => {
            return format_number(length.number, precision);
        }
        LengthUnit::In => 96.0,
        LengthUnit::Cm => 96.0 / 2.54,
        LengthUnit::Mm => 96.0 / 25.4,
        LengthUnit::Pt => 4.0 / 3.0,
        LengthUnit::Pc => 16.0,
        _ => return original,
    };

    let px = format_number(length.number * px_factor, precision);
    if px.len() < original.len() {
        px
    } else {
        original
    }
}

fn unit_str(unit: LengthUnit) -> &'static str {
    match unit {
        LengthUnit::None | LengthUnit::Px => "",
        LengthUnit::Em => "em",
        LengthUnit::Ex => "ex",
        LengthUnit::In => "in",
        LengthUnit::Cm => "cm",
        LengthUnit::Mm => "mm",
        LengthUnit::Pt => "pt",
        LengthUnit::Pc => "pc",
        LengthUnit::Percent => "%",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(format_length(Length::from_str("10.000px").unwrap(), 2), "10");
        assert_eq!(format_length(Length::from_str("0.5em").unwrap(), 2), ".5em");
        assert_eq!(format_length(Length::from_str("1in").unwrap(), 2), "96");
        assert_eq!(format_length(Length::from_str("33.3333%").unwrap(), 2), "33.33%");
    }

    #[test]
    fn lists() {
        assert_eq!(round_list("0, 0.000, 24.001 24", 2).as_deref(), Some("0 0 24 24"));
        assert_eq!(round_list("10 foo", 2), None);
    }
}
