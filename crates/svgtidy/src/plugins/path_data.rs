// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::PathSegment;

use super::prelude::*;

/// An absolute path segment with resolved control points.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum Segment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CurveTo { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    Quadratic { x1: f64, y1: f64, x: f64, y: f64 },
    ArcTo { rx: f64, ry: f64, angle: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
    ClosePath,
}

/// Rewrites path data in the shortest form.
pub fn convert_path_data(doc: &mut Document, opt: &Options) {
    for id in doc.elements() {
        if !doc.is_tag(id, "path") {
            continue;
        }

        let d = match doc.attribute(id, "d") {
            Some(v) => v.to_string(),
            None => continue,
        };

        let segments = match parse_absolute(&d) {
            Some(v) => v,
            None => {
                log::warn!("Path data '{}' is invalid. Skipped.", shorten(&d));
                continue;
            }
        };

        let keep_zero_length = has_markers_or_caps(doc, id);
        let segments = simplify(round_segments(&segments, opt.float_precision), keep_zero_length);
        let new_d = write_segments(&segments, opt.float_precision);
        if new_d.len() <= d.len() {
            if let Some(e) = doc.element_mut(id) {
                e.set_attribute("d", new_d);
            }
        }
    }
}

fn shorten(s: &str) -> &str {
    match s.char_indices().nth(32) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

// Zero-length segments still render markers and round/square caps.
fn has_markers_or_caps(doc: &Document, id: NodeId) -> bool {
    doc.ancestors(id).any(|a| {
        let e = match doc.element(a) {
            Some(e) => e,
            None => return false,
        };

        e.has_attribute("marker-start")
            || e.has_attribute("marker-mid")
            || e.has_attribute("marker-end")
            || e.has_attribute("marker")
            || matches!(e.attribute("stroke-linecap").map(str::trim), Some("round") | Some("square"))
            || e.attribute("style").map(|s| s.contains("marker") || s.contains("linecap")) == Some(true)
    })
}

/// Parses path data into absolute segments.
///
/// Returns `None` on invalid data.
pub(crate) fn parse_absolute(d: &str) -> Option<Vec<Segment>> {
    let mut list = Vec::new();
    // current point, subpath start and the previous control points
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);
    let mut prev_cubic: Option<(f64, f64)> = None;
    let mut prev_quad: Option<(f64, f64)> = None;

    for segment in svgtypes::PathParser::from(d) {
        let segment = segment.ok()?;
        let (ox, oy) = (cx, cy);
        let rel = |abs: bool, x: f64, y: f64| if abs { (x, y) } else { (ox + x, oy + y) };

        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;
        let seg = match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let (x, y) = rel(abs, x, y);
                sx = x;
                sy = y;
                Segment::MoveTo { x, y }
            }
            PathSegment::LineTo { abs, x, y } => {
                let (x, y) = rel(abs, x, y);
                Segment::LineTo { x, y }
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { ox + x };
                Segment::LineTo { x, y: oy }
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { oy + y };
                Segment::LineTo { x: ox, y }
            }
            PathSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                let (x1, y1) = rel(abs, x1, y1);
                let (x2, y2) = rel(abs, x2, y2);
                let (x, y) = rel(abs, x, y);
                cubic_ctrl = Some((x2, y2));
                Segment::CurveTo { x1, y1, x2, y2, x, y }
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let (x1, y1) = match prev_cubic {
                    Some((px, py)) => (2.0 * ox - px, 2.0 * oy - py),
                    None => (ox, oy),
                };
                let (x2, y2) = rel(abs, x2, y2);
                let (x, y) = rel(abs, x, y);
                cubic_ctrl = Some((x2, y2));
                Segment::CurveTo { x1, y1, x2, y2, x, y }
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let (x1, y1) = rel(abs, x1, y1);
                let (x, y) = rel(abs, x, y);
                quad_ctrl = Some((x1, y1));
                Segment::Quadratic { x1, y1, x, y }
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let (x1, y1) = match prev_quad {
                    Some((px, py)) => (2.0 * ox - px, 2.0 * oy - py),
                    None => (ox, oy),
                };
                let (x, y) = rel(abs, x, y);
                quad_ctrl = Some((x1, y1));
                Segment::Quadratic { x1, y1, x, y }
            }
            PathSegment::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                let (x, y) = rel(abs, x, y);
                Segment::ArcTo { rx, ry, angle: x_axis_rotation, large_arc, sweep, x, y }
            }
            PathSegment::ClosePath { .. } => {
                cx = sx;
                cy = sy;
                list.push(Segment::ClosePath);
                prev_cubic = None;
                prev_quad = None;
                continue;
            }
        };

        if let Some((x, y)) = end_point(&seg) {
            cx = x;
            cy = y;
        }

        prev_cubic = cubic_ctrl;
        prev_quad = quad_ctrl;
        list.push(seg);
    }

    Some(list)
}

fn end_point(seg: &Segment) -> Option<(f64, f64)> {
    match *seg {
        Segment::MoveTo { x, y }
        | Segment::LineTo { x, y }
        | Segment::CurveTo { x, y, .. }
        | Segment::Quadratic { x, y, .. }
        | Segment::ArcTo { x, y, .. } => Some((x, y)),
        Segment::ClosePath => None,
    }
}

/// A control points bounding box: `(min_x, min_y, max_x, max_y)`.
///
/// Contains the curve, but can be larger than the curve itself.
pub(crate) fn control_bbox(segments: &[Segment]) -> Option<(f64, f64, f64, f64)> {
    let mut bbox: Option<(f64, f64, f64, f64)> = None;
    let mut add = |x: f64, y: f64| {
        bbox = Some(match bbox {
            Some((x1, y1, x2, y2)) => (x1.min(x), y1.min(y), x2.max(x), y2.max(y)),
            None => (x, y, x, y),
        });
    };

    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);
    for seg in segments {
        match *seg {
            Segment::MoveTo { x, y } => {
                sx = x;
                sy = y;
                add(x, y);
            }
            Segment::LineTo { x, y } => add(x, y),
            Segment::CurveTo { x1, y1, x2, y2, x, y } => {
                add(x1, y1);
                add(x2, y2);
                add(x, y);
            }
            Segment::Quadratic { x1, y1, x, y } => {
                add(x1, y1);
                add(x, y);
            }
            Segment::ArcTo { rx, ry, x, y, .. } => {
                // An arc never leaves the box of its both ellipse positions.
                let r = rx.abs().max(ry.abs());
                add(cx - r, cy - r);
                add(cx + r, cy + r);
                add(x - r, y - r);
                add(x + r, y + r);
            }
            Segment::ClosePath => {
                cx = sx;
                cy = sy;
            }
        }

        if let Some((x, y)) = end_point(seg) {
            cx = x;
            cy = y;
        }
    }

    bbox
}

fn round_segments(segments: &[Segment], p: u8) -> Vec<Segment> {
    let r = |n: f64| round(n, p);
    segments
        .iter()
        .map(|seg| match *seg {
            Segment::MoveTo { x, y } => Segment::MoveTo { x: r(x), y: r(y) },
            Segment::LineTo { x, y } => Segment::LineTo { x: r(x), y: r(y) },
            Segment::CurveTo { x1, y1, x2, y2, x, y } => Segment::CurveTo {
                x1: r(x1),
                y1: r(y1),
                x2: r(x2),
                y2: r(y2),
                x: r(x),
                y: r(y),
            },
            Segment::Quadratic { x1, y1, x, y } => Segment::Quadratic {
                x1: r(x1),
                y1: r(y1),
                x: r(x),
                y: r(y),
            },
            Segment::ArcTo { rx, ry, angle, large_arc, sweep, x, y } => Segment::ArcTo {
                rx: r(rx),
                ry: r(ry),
                angle: r(angle),
                large_arc,
                sweep,
                x: r(x),
                y: r(y),
            },
            Segment::ClosePath => Segment::ClosePath,
        })
        .collect()
}

/// Removes redundant move-to and zero-length segments.
fn simplify(segments: Vec<Segment>, keep_zero_length: bool) -> Vec<Segment> {
    let mut list: Vec<Segment> = Vec::with_capacity(segments.len());
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);

    for (i, seg) in segments.iter().enumerate() {
        match *seg {
            Segment::MoveTo { x, y } => {
                // Only the last of consecutive move-to segments matters.
                let next_is_move = matches!(segments.get(i + 1), Some(Segment::MoveTo { .. }));
                if next_is_move && !keep_zero_length {
                    continue;
                }

                sx = x;
                sy = y;
            }
            Segment::ClosePath => {
                // `M 0 0 Z` draws nothing.
                if matches!(list.last(), Some(Segment::ClosePath)) {
                    continue;
                }
            }
            _ if !keep_zero_length && is_zero_length(seg, cx, cy) => continue,
            _ => {}
        }

        match *seg {
            Segment::ClosePath => {
                cx = sx;
                cy = sy;
            }
            _ => {
                if let Some((x, y)) = end_point(seg) {
                    cx = x;
                    cy = y;
                }
            }
        }

        list.push(*seg);
    }

    // A trailing move-to draws nothing.
    if !keep_zero_length && list.len() > 1 {
        if let Some(Segment::MoveTo { .. }) = list.last() {
            list.pop();
        }
    }

    list
}

fn is_zero_length(seg: &Segment, cx: f64, cy: f64) -> bool {
    match *seg {
        Segment::LineTo { x, y } | Segment::ArcTo { x, y, .. } => x == cx && y == cy,
        Segment::CurveTo { x1, y1, x2, y2, x, y } => {
            x == cx && y == cy && x1 == cx && y1 == cy && x2 == cx && y2 == cy
        }
        Segment::Quadratic { x1, y1, x, y } => x == cx && y == cy && x1 == cx && y1 == cy,
        _ => false,
    }
}

/// Writes segments, choosing between absolute and relative forms per segment.
pub(crate) fn write_segments(segments: &[Segment], p: u8) -> String {
    let mut out = String::new();
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);
    let mut prev_cubic: Option<(f64, f64)> = None;
    let mut prev_quad: Option<(f64, f64)> = None;
    let mut prev_cmd: Option<char> = None;

    let f = |n: f64| format_number(n, p);

    for (i, seg) in segments.iter().enumerate() {
        // (absolute command, absolute args, relative args)
        let (cmd, abs, rel): (char, Vec<String>, Vec<String>) = match *seg {
            Segment::MoveTo { x, y } => {
                sx = x;
                sy = y;
                let abs = vec![f(x), f(y)];
                // The first move-to is always absolute.
                let rel = if i == 0 { abs.clone() } else { vec![f(x - cx), f(y - cy)] };
                ('M', abs, rel)
            }
            Segment::LineTo { x, y } => {
                if y == cy && x != cx {
                    ('H', vec![f(x)], vec![f(x - cx)])
                } else if x == cx && y != cy {
                    ('V', vec![f(y)], vec![f(y - cy)])
                } else {
                    ('L', vec![f(x), f(y)], vec![f(x - cx), f(y - cy)])
                }
            }
            Segment::CurveTo { x1, y1, x2, y2, x, y } => {
                let reflected = match prev_cubic {
                    Some((px, py)) => (round(2.0 * cx - px, p), round(2.0 * cy - py, p)),
                    None => (cx, cy),
                };

                if reflected == (x1, y1) {
                    (
                        'S',
                        vec![f(x2), f(y2), f(x), f(y)],
                        vec![f(x2 - cx), f(y2 - cy), f(x - cx), f(y - cy)],
                    )
                } else {
                    (
                        'C',
                        vec![f(x1), f(y1), f(x2), f(y2), f(x), f(y)],
                        vec![f(x1 - cx), f(y1 - cy), f(x2 - cx), f(y2 - cy), f(x - cx), f(y - cy)],
                    )
                }
            }
            Segment::Quadratic { x1, y1, x, y } => {
                let reflected = match prev_quad {
                    Some((px, py)) => (round(2.0 * cx - px, p), round(2.0 * cy - py, p)),
                    None => (cx, cy),
                };

                if reflected == (x1, y1) {
                    ('T', vec![f(x), f(y)], vec![f(x - cx), f(y - cy)])
                } else {
                    (
                        'Q',
                        vec![f(x1), f(y1), f(x), f(y)],
                        vec![f(x1 - cx), f(y1 - cy), f(x - cx), f(y - cy)],
                    )
                }
            }
            Segment::ArcTo { rx, ry, angle, large_arc, sweep, x, y } => {
                let flags = |v: bool| if v { "1".to_string() } else { "0".to_string() };
                let common = vec![f(rx), f(ry), f(angle), flags(large_arc), flags(sweep)];
                let mut abs = common.clone();
                abs.extend([f(x), f(y)]);
                let mut rel = common;
                rel.extend([f(x - cx), f(y - cy)]);
                ('A', abs, rel)
            }
            Segment::ClosePath => ('Z', Vec::new(), Vec::new()),
        };

        let abs_len: usize = abs.iter().map(|s| s.len() + 1).sum();
        let rel_len: usize = rel.iter().map(|s| s.len() + 1).sum();
        let (letter, args) = if cmd == 'Z' {
            ('z', abs)
        } else if i == 0 || abs_len < rel_len {
            (cmd, abs)
        } else {
            (cmd.to_ascii_lowercase(), rel)
        };

        let implicit = match (prev_cmd, letter) {
            (Some(prev), cur) if prev == cur && cur != 'M' && cur != 'm' && cur != 'z' => true,
            (Some('M'), 'L') | (Some('m'), 'l') => true,
            _ => false,
        };

        if !implicit {
            out.push(letter);
        }

        for arg in &args {
            push_compact(&mut out, arg);
        }

        prev_cmd = Some(letter);

        match *seg {
            Segment::CurveTo { x2, y2, .. } => {
                prev_cubic = Some((x2, y2));
                prev_quad = None;
            }
            Segment::Quadratic { x1, y1, .. } => {
                prev_quad = Some((x1, y1));
                prev_cubic = None;
            }
            _ => {
                prev_cubic = None;
                prev_quad = None;
            }
        }

        match *seg {
            Segment::ClosePath => {
                cx = sx;
                cy = sy;
            }
            _ => {
                if let Some((x, y)) = end_point(seg) {
                    cx = x;
                    cy = y;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(d: &str) -> String {
        let segments = parse_absolute(d).unwrap();
        write_segments(&simplify(round_segments(&segments, 2), false), 2)
    }

    #[test]
    fn lines() {
        assert_eq!(convert("M 10 10 L 20 10 L 20 20 L 10 20 Z"), "M10 10h10v10H10z");
    }

    #[test]
    fn relative_is_preferred_when_shorter() {
        assert_eq!(convert("M 100 100 L 101 101 L 102 102"), "M100 100l1 1 1 1");
    }

    #[test]
    fn smooth_curves() {
        assert_eq!(
            convert("M0 0C0 10 10 10 10 0C10 -10 20 -10 20 0"),
            "M0 0c0 10 10 10 10 0s10-10 10 0"
        );
    }

    #[test]
    fn zero_length_segments() {
        assert_eq!(convert("M0 0L0 0L5 5M1 1M2 2L3 3"), "M0 0l5 5M2 2l1 1");
    }

    #[test]
    fn rounding() {
        assert_eq!(convert("M0.123 0.456L10.001 0.456"), "M.12.46H10");
    }

    #[test]
    fn invalid_data() {
        assert!(parse_absolute("M 10 10 L 20").is_none());
    }
}
