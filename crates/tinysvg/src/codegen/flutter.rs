// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::Component;

const LINE_SEPARATOR: &str = "\n        ";

pub(crate) fn generate(component: &Component) -> String {
    format!(
        "import 'package:flutter/material.dart';
import 'package:flutter_svg/flutter_svg.dart';

class {name} extends StatelessWidget {{
  const {name}({{Key? key}}) : super(key: key);

  @override
  Widget build(BuildContext context) {{
    return SvgPicture.string(
      '''{svg}''',
      width: 24,
      height: 24,
    );
  }}
}}
",
        name = component.name,
        svg = format_markup(&component.markup()),
    )
}

// Puts each tag on its own line inside a Dart string literal.
fn format_markup(svg: &str) -> String {
    let escaped = svg.replace('\'', "\\'");
    let parts: Vec<&str> = escaped.split('>').collect();
    let last = parts.len() - 1;

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i < last {
                format!("{}>", part.trim())
            } else {
                part.trim().to_string()
            }
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_lines() {
        assert_eq!(
            format_markup("<svg a='1'><path/></svg>"),
            "<svg a=\\'1\\'>\n        <path/>\n        </svg>"
        );
    }
}
