// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`tinysvg` is an SVG workbench built on top of [`svgtidy`].

It loads SVG from files, stdin or base64 data URIs, optimizes it,
rotates, flips and resizes it, renders it to PNG or JPEG, turns it into
a component for a UI framework and keeps a local history of conversions.

## Example

```
use tinysvg::codegen::{generate, Target};

let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'>\
           <path stroke-width='2' d='M0 0h16'/></svg>";
let code = generate(Target::ReactJsx, svg, Some("line.svg")).unwrap();
assert!(code.contains("export function Line(props)"));
assert!(code.contains("<path strokeWidth=\"2\" d=\"M0 0h16\"/>"));
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod codegen;
pub mod config;
pub mod data_uri;
pub mod diff;
pub mod dimensions;
mod error;
pub mod export;
pub mod history;
pub mod i18n;
pub mod session;
pub mod source;
pub mod transform;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::session::Session;
pub use crate::source::Source;

pub use svgtidy;
