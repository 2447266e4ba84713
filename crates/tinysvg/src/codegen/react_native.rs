// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtidy::SVG_NS;

use super::react::ATTRIBUTES_MAP;
use super::{Component, SVG_DIMENSIONS};

// SVG elements supported by `react-native-svg`.
const ELEMENTS_MAP: &[(&str, &str)] = &[
    ("path", "Path"),
    ("g", "G"),
    ("circle", "Circle"),
    ("ellipse", "Ellipse"),
    ("line", "Line"),
    ("polyline", "Polyline"),
    ("polygon", "Polygon"),
    ("rect", "Rect"),
    ("defs", "Defs"),
    ("linearGradient", "LinearGradient"),
    ("radialGradient", "RadialGradient"),
    ("stop", "Stop"),
    ("text", "Text"),
    ("tspan", "TSpan"),
];

pub(crate) fn generate(component: &mut Component) -> String {
    let imports = component.rename_elements(ELEMENTS_MAP).join(", ");
    component.rename_attributes(ATTRIBUTES_MAP);

    format!(
        "import React from \"react\";
import Svg, {{ {imports} }} from \"react-native-svg\";

export function {name}(props) {{
  return (
    <Svg
      xmlns=\"{ns}\"
      width=\"{size}\"
      height=\"{size}\"
      viewBox=\"{view_box}\"
      {{...props}}
    >
      {content}
    </Svg>
  );
}}

export default {name};
",
        imports = imports,
        name = component.name,
        ns = SVG_NS,
        size = SVG_DIMENSIONS,
        view_box = component.view_box,
        content = component.inner_markup().trim(),
    )
}
