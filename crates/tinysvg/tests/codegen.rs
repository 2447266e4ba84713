// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tinysvg::codegen::{generate, Target};

fn render(name: &str, target: Target, expected: &str) {
    let input_svg = std::fs::read_to_string(format!("tests/files/{}.svg", name)).unwrap();
    let code = generate(target, &input_svg, Some(&format!("{}.svg", name))).unwrap();

    // std::fs::write(format!("tests/files/{}", expected), &code).unwrap();

    let expected_code = std::fs::read_to_string(format!("tests/files/{}", expected)).unwrap();
    assert_eq!(code, expected_code);
}

#[test]
fn react_jsx() {
    render("close-icon", Target::ReactJsx, "close-icon.jsx");
}

#[test]
fn react_tsx() {
    render("close-icon", Target::ReactTsx, "close-icon.tsx");
}

#[test]
fn vue() {
    render("close-icon", Target::Vue, "close-icon.vue");
}

#[test]
fn svelte() {
    render("close-icon", Target::Svelte, "close-icon.svelte");
}

#[test]
fn react_native() {
    render("close-icon", Target::ReactNative, "close-icon.native.jsx");
}

#[test]
fn react_native_containers() {
    render("two-colors", Target::ReactNative, "two-colors.native.jsx");
}

#[test]
fn flutter() {
    render("close-icon", Target::Flutter, "close-icon.dart");
}

#[test]
fn not_an_svg() {
    assert!(generate(Target::Vue, "<html/>", None).is_err());
}

#[test]
fn default_name() {
    let code = generate(Target::ReactJsx, "<svg xmlns='http://www.w3.org/2000/svg'/>", None).unwrap();
    assert!(code.contains("export function TinySVGDemo(props)"));
    assert!(code.contains("viewBox=\"0 0 24 24\""));
}
