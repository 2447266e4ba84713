// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtidy::SVG_NS;

use super::{Component, SVG_DIMENSIONS};

// Svelte components are named by their file, so the name is not used.
pub(crate) fn generate(component: &Component) -> String {
    format!(
        "<svg
  xmlns=\"{ns}\"
  width=\"{size}\"
  height=\"{size}\"
  viewBox=\"{view_box}\"
  {{...$$props}}
>
  {content}
</svg>
",
        ns = SVG_NS,
        size = SVG_DIMENSIONS,
        view_box = component.view_box,
        content = component.inner_markup().trim(),
    )
}
