// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtidy::SVG_NS;

use super::{Component, SVG_DIMENSIONS};

// Hyphenated presentation attributes that React expects in camelCase.
pub(crate) const ATTRIBUTES_MAP: &[(&str, &str)] = &[
    ("stroke-width", "strokeWidth"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-dasharray", "strokeDasharray"),
    ("stroke-dashoffset", "strokeDashoffset"),
    ("stroke-miterlimit", "strokeMiterlimit"),
    ("stroke-opacity", "strokeOpacity"),
    ("fill-opacity", "fillOpacity"),
    ("fill-rule", "fillRule"),
    ("clip-path", "clipPath"),
    ("clip-rule", "clipRule"),
];

pub(crate) fn generate(component: &mut Component, typescript: bool) -> String {
    component.rename_attributes(ATTRIBUTES_MAP);
    let content = component.inner_markup();

    let (import, props) = if typescript {
        (
            "import React, { SVGProps } from \"react\";",
            "props: SVGProps<SVGSVGElement>",
        )
    } else {
        ("import React from \"react\";", "props")
    };

    format!(
        "{import}

export function {name}({props}) {{
  return (
    <svg
      xmlns=\"{ns}\"
      width=\"{size}\"
      height=\"{size}\"
      viewBox=\"{view_box}\"
      {{...props}}
    >
      {content}
    </svg>
  );
}}

export default {name};
",
        import = import,
        name = component.name,
        props = props,
        ns = SVG_NS,
        size = SVG_DIMENSIONS,
        view_box = component.view_box,
        content = content.trim(),
    )
}
