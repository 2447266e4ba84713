// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rotating, flipping and resizing.
//!
//! All operations keep the content in place by wrapping it in a transformed
//! group and adjusting the root `viewBox`. Unparsable input is returned as is.

use svgtidy::{Document, Element, WriteOptions};

use crate::dimensions::{number_to_string as num, root_dimensions, Dimensions, ViewBox};

/// The rotation step in degrees.
pub const ROTATION_ANGLE: f64 = 90.0;

/// A transformation applied by [`apply`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Transformation {
    /// 90° clockwise.
    Rotate,
    #[allow(missing_docs)]
    FlipHorizontal,
    #[allow(missing_docs)]
    FlipVertical,
    /// Sets the new width and height.
    Resize(f64, f64),
}

/// Applies a transformation to SVG markup.
pub fn apply(text: &str, ts: Transformation) -> String {
    match ts {
        Transformation::Rotate => rotate(text),
        Transformation::FlipHorizontal => flip_horizontal(text),
        Transformation::FlipVertical => flip_vertical(text),
        Transformation::Resize(w, h) => resize(text, w, h),
    }
}

/// Returns a file name for a transformed SVG.
///
/// Replaces the first `.svg` occurrence, like `icon.svg` to `icon.rotated.svg`,
/// so the source file is never overwritten by default.
pub fn transformed_file_name(name: &str, ts: Transformation) -> String {
    let suffix = match ts {
        Transformation::Rotate => "rotated".to_string(),
        Transformation::FlipHorizontal => "flipped-h".to_string(),
        Transformation::FlipVertical => "flipped-v".to_string(),
        Transformation::Resize(w, h) => format!("{}x{}", num(w), num(h)),
    };

    if name.contains(".svg") {
        name.replacen(".svg", &format!(".{}.svg", suffix), 1)
    } else {
        format!("{}.{}.svg", name, suffix)
    }
}

/// Rotates SVG by 90 degrees clockwise around the `viewBox` center.
///
/// `width` and `height` are swapped.
pub fn rotate(text: &str) -> String {
    edit(text, |doc, dims| {
        let vb = resolve_view_box(dims);
        let cx = vb.x + vb.width / 2.0;
        let cy = vb.y + vb.height / 2.0;

        let svg = doc.root_element();
        if let Some(e) = doc.element_mut(svg) {
            e.set_attribute("width", num(dims.height));
            e.set_attribute("height", num(dims.width));

            let min_x = cx - vb.height / 2.0;
            let min_y = cy - vb.width / 2.0;
            e.set_attribute(
                "viewBox",
                format!("{} {} {} {}", num(min_x), num(min_y), num(vb.height), num(vb.width)),
            );
        }

        let transform = format!("rotate({} {} {})", num(ROTATION_ANGLE), num(cx), num(cy));
        wrap_content(doc, transform);
    })
}

/// Mirrors SVG along the vertical axis.
pub fn flip_horizontal(text: &str) -> String {
    edit(text, |doc, dims| {
        let vb = resolve_view_box(dims);
        let right_edge = vb.x + vb.width;
        wrap_content(doc, format!("scale(-1 1) translate({} 0)", num(-right_edge)));
    })
}

/// Mirrors SVG along the horizontal axis.
pub fn flip_vertical(text: &str) -> String {
    edit(text, |doc, dims| {
        let vb = resolve_view_box(dims);
        let bottom_edge = vb.y + vb.height;
        wrap_content(doc, format!("scale(1 -1) translate(0 {})", num(-bottom_edge)));
    })
}

/// Sets the new `width` and `height`.
///
/// When there is no `viewBox`, it's created from the old size,
/// so the content is scaled instead of being cropped.
pub fn resize(text: &str, width: f64, height: f64) -> String {
    edit(text, |doc, dims| {
        let svg = doc.root_element();
        if let Some(e) = doc.element_mut(svg) {
            e.set_attribute("width", num(width));
            e.set_attribute("height", num(height));

            if dims.view_box.is_none() {
                e.set_attribute(
                    "viewBox",
                    format!("0 0 {} {}", num(dims.width), num(dims.height)),
                );
            }
        }
    })
}

fn edit<F>(text: &str, f: F) -> String
where
    F: FnOnce(&mut Document, &Dimensions),
{
    let mut doc = match Document::parse(text) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Failed to parse SVG cause {}.", e);
            return text.to_string();
        }
    };

    let dims = root_dimensions(&doc);
    f(&mut doc, &dims);
    doc.to_string(&WriteOptions::default())
}

// Missing or zero `viewBox` values fall back to the root size.
fn resolve_view_box(dims: &Dimensions) -> ViewBox {
    let mut vb = ViewBox {
        x: 0.0,
        y: 0.0,
        width: dims.width,
        height: dims.height,
    };

    if let Some(parsed) = dims.view_box.as_deref().and_then(ViewBox::parse) {
        vb.x = parsed.x;
        vb.y = parsed.y;
        if parsed.width != 0.0 {
            vb.width = parsed.width;
        }
        if parsed.height != 0.0 {
            vb.height = parsed.height;
        }
    }

    vb
}

fn wrap_content(doc: &mut Document, transform: String) {
    let svg = doc.root_element();
    let mut group = Element::new("g");
    group.set_attribute("transform", transform);
    doc.wrap_children(svg, group);
}
