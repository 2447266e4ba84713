// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtidy::{Indent, Options, Plugin, WriteOptions};

fn optimize(name: &str) {
    let input_svg = std::fs::read_to_string(format!("tests/files/{}.svg", name)).unwrap();
    let output = svgtidy::optimize(&input_svg, &Options::default()).unwrap();

    // std::fs::write(format!("tests/files/{}-expected.svg", name), &output.data).unwrap();

    let expected_svg =
        std::fs::read_to_string(format!("tests/files/{}-expected.svg", name)).unwrap();
    assert!(output.data == expected_svg.trim_end());
}

#[test]
fn editor_export() {
    optimize("editor-export");
}

#[test]
fn gradient_icon() {
    optimize("gradient-icon");
}

#[test]
fn style_sheet() {
    optimize("style-sheet");
}

#[test]
fn illustrator_export() {
    optimize("illustrator-export");
}

#[test]
fn output_is_stable() {
    let input_svg = std::fs::read_to_string("tests/files/gradient-icon.svg").unwrap();
    let opt = Options::default();
    let first = svgtidy::optimize(&input_svg, &opt).unwrap();
    let second = svgtidy::optimize(&first.data, &opt).unwrap();
    assert_eq!(first.data, second.data);
    assert_eq!(second.passes, 2);
}

#[test]
fn single_pass() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><g><g><path d='M0 0L10 10'/></g></g></svg>";
    let opt = Options {
        multipass: false,
        ..Options::default()
    };
    let output = svgtidy::optimize(svg, &opt).unwrap();
    assert_eq!(output.passes, 1);
}

#[test]
fn float_precision() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><path d='M0.123 0.456L10.789 10.111'/></svg>";
    let opt = Options {
        float_precision: 1,
        ..Options::default()
    };
    let output = svgtidy::optimize(svg, &opt).unwrap();
    assert_eq!(
        output.data,
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><path d=\"M.1.5l10.7 9.6\"/></svg>"
    );
}

#[test]
fn disabled_plugin_keeps_content() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><!-- note --><title>Icon</title></svg>";
    let mut opt = Options::default();
    opt.set_enabled(Plugin::RemoveComments, false);
    opt.set_enabled(Plugin::RemoveTitle, false);
    let output = svgtidy::optimize(svg, &opt).unwrap();
    assert_eq!(
        output.data,
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><!-- note --><title>Icon</title></svg>"
    );
}

#[test]
fn no_plugins() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><g id='a'><rect width='10' height='10'/></g></svg>";
    let mut opt = Options::default();
    for p in Plugin::all() {
        opt.set_enabled(*p, false);
    }
    let output = svgtidy::optimize(svg, &opt).unwrap();
    assert_eq!(
        output.data,
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><g id=\"a\"><rect width=\"10\" height=\"10\"/></g></svg>"
    );
}

#[test]
fn pretty_output() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><g id='a'><rect width='10' height='10'/></g></svg>";
    let doc = svgtidy::Document::parse(svg).unwrap();
    let opt = WriteOptions {
        indent: Indent::Spaces(2),
        ..WriteOptions::default()
    };
    assert_eq!(
        doc.to_string(&opt),
        "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <g id=\"a\">\n    <rect width=\"10\" height=\"10\"/>\n  </g>\n</svg>"
    );
}

#[test]
fn not_an_svg() {
    let result = svgtidy::optimize("<html/>", &Options::default());
    assert!(matches!(result, Err(svgtidy::Error::NotAnSvg)));
}

#[test]
fn malformed_xml() {
    let result = svgtidy::optimize("<svg", &Options::default());
    assert!(matches!(result, Err(svgtidy::Error::ParsingFailed(_))));
}

#[test]
fn type_selectors_keep_shapes() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'>\
               <style>rect{fill:green} .a{fill:red}</style>\
               <rect class='a' x='0' y='0' width='40' height='40'/>\
               <rect x='50' y='50' width='40' height='40'/></svg>";
    let output = svgtidy::optimize(svg, &Options::default()).unwrap();
    assert!(!output.data.contains("<path"));
    assert!(output.data.contains("<rect width=\"40\" height=\"40\" x=\"50\" y=\"50\"/>"));
}

#[test]
fn type_selectors_keep_groups() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'>\
               <style>g{fill:red}</style>\
               <g><g><rect x='10' y='10' width='40' height='40'/></g></g></svg>";
    let output = svgtidy::optimize(svg, &Options::default()).unwrap();
    assert!(output.data.contains("<g><g>"));
}
