// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::prelude::*;

const TRANSFORM_ATTRIBUTES: &[&str] = &["gradientTransform", "patternTransform", "transform"];

/// Collapses transform lists into the shortest equivalent.
pub fn convert_transform(doc: &mut Document, opt: &Options) {
    for id in doc.elements() {
        if let Some(e) = doc.element_mut(id) {
            let mut remove = Vec::new();
            for attr in &mut e.attributes {
                if !is_one_of(&attr.name, TRANSFORM_ATTRIBUTES) {
                    continue;
                }

                let ts = match svgtypes::Transform::from_str(&attr.value) {
                    Ok(v) => v,
                    Err(_) => {
                        log::warn!("Failed to parse {} value: '{}'.", attr.name, attr.value);
                        continue;
                    }
                };

                match shortest_transform(ts, opt) {
                    None => remove.push(attr.name.clone()),
                    Some(s) if s.len() < attr.value.len() => attr.value = s,
                    Some(_) => {}
                }
            }

            for name in remove {
                e.remove_attribute(&name);
            }
        }
    }
}

/// Returns the shortest notation of a matrix or `None` for an identity one.
pub fn shortest_transform(ts: svgtypes::Transform, opt: &Options) -> Option<String> {
    let tp = opt.transform_precision;
    let fp = opt.float_precision;

    let a = round(ts.a, tp);
    let b = round(ts.b, tp);
    let c = round(ts.c, tp);
    let d = round(ts.d, tp);
    let e = round(ts.e, fp);
    let f = round(ts.f, fp);

    let has_translate = e != 0.0 || f != 0.0;
    let is_axis_aligned = b == 0.0 && c == 0.0;
    let has_scale = a != 1.0 || d != 1.0;

    if is_axis_aligned && !has_scale && !has_translate {
        return None;
    }

    let mut candidates = Vec::new();
    candidates.push(function("matrix", &[a, b, c, d, e, f], &[tp, tp, tp, tp, fp, fp]));

    if is_axis_aligned {
        let translate = if f == 0.0 {
            function("translate", &[e], &[fp])
        } else {
            function("translate", &[e, f], &[fp, fp])
        };

        let scale = if a == d {
            function("scale", &[a], &[tp])
        } else {
            function("scale", &[a, d], &[tp, tp])
        };

        match (has_translate, has_scale) {
            (true, false) => candidates.push(translate),
            (false, true) => candidates.push(scale),
            _ => candidates.push(format!("{}{}", translate, scale)),
        }
    } else if c == -b && d == a && !has_translate {
        let scale = (a * a + b * b).sqrt();
        if (scale - 1.0).abs() < 1e-4 {
            let angle = b.atan2(a).to_degrees();
            candidates.push(function("rotate", &[angle], &[fp]));
        }
    }

    candidates.into_iter().min_by_key(|s| s.len())
}

fn function(name: &str, args: &[f64], precision: &[u8]) -> String {
    let mut s = String::from(name);
    s.push('(');
    for (n, p) in args.iter().zip(precision) {
        let num = format_number(*n, *p);
        if s.ends_with('(') {
            s.push_str(&num);
        } else {
            push_compact(&mut s, &num);
        }
    }
    s.push(')');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(s: &str) -> Option<String> {
        shortest_transform(svgtypes::Transform::from_str(s).unwrap(), &Options::default())
    }

    #[test]
    fn shortest() {
        assert_eq!(convert("translate(10, 0) scale(1)").as_deref(), Some("translate(10)"));
        assert_eq!(convert("scale(2, 2)").as_deref(), Some("scale(2)"));
        assert_eq!(convert("rotate(90)").as_deref(), Some("rotate(90)"));
        assert_eq!(convert("translate(5 5) translate(-5 -5)"), None);
        assert_eq!(
            convert("matrix(1, 0.5, 0, 1, 10, 20)").as_deref(),
            Some("matrix(1 .5 0 1 10 20)")
        );
        assert_eq!(convert("translate(10 20) scale(2)").as_deref(), Some("matrix(2 0 0 2 10 20)"));
    }
}
