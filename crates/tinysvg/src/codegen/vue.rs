// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtidy::SVG_NS;

use super::{Component, SVG_DIMENSIONS};

pub(crate) fn generate(component: &Component) -> String {
    format!(
        "<template>
  <svg
    xmlns=\"{ns}\"
    width=\"{size}\"
    height=\"{size}\"
    viewBox=\"{view_box}\"
  >
    {content}
  </svg>
</template>

<script>
export default {{
  name: '{name}'
}}
</script>
",
        ns = SVG_NS,
        size = SVG_DIMENSIONS,
        view_box = component.view_box,
        content = component.inner_markup().trim(),
        name = component.name,
    )
}
