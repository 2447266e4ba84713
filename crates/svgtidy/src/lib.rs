// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgtidy` is an SVG optimizer.

It parses an SVG file into a mutable document, runs a list of optimization
plugins over it and writes the document back as minified markup.

Unlike a renderer, `svgtidy` doesn't resolve anything. Unknown elements,
editor data, scripts and styles are preserved unless a plugin that removes
them is enabled, and each plugin leaves an element untouched when a change
cannot be proven safe.

## Example

```
let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='10' height='10'>\
           <!-- comment --><g><rect x='0' y='0' width='10' height='10' fill='#ff0000'/></g></svg>";
let output = svgtidy::optimize(svg, &svgtidy::Options::default()).unwrap();
assert_eq!(
    output.data,
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"><path fill=\"red\" d=\"M0 0h10v10H0z\"/></svg>"
);
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod error;
pub mod numbers;
mod plugins;
mod tree;
mod writer;

pub use crate::error::Error;
pub use crate::plugins::*;
pub use crate::tree::*;
pub use crate::writer::*;
