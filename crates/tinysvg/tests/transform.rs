// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tinysvg::dimensions::svg_dimensions;
use tinysvg::transform::{apply, Transformation};
use tinysvg::Session;

#[test]
fn four_rotations_restore_size() {
    let input_svg = std::fs::read_to_string("tests/files/close-icon.svg").unwrap();
    let mut svg = input_svg.clone();
    for _ in 0..4 {
        svg = apply(&svg, Transformation::Rotate);
    }

    let dims = svg_dimensions(&svg).unwrap();
    assert_eq!(dims.view_box.as_deref(), Some("0 0 24 24"));
    assert_eq!(svg.matches("rotate(90 12 12)").count(), 4);
}

#[test]
fn rotate_without_view_box() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='40' height='20'><rect width='40' height='20'/></svg>";
    assert_eq!(
        apply(svg, Transformation::Rotate),
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"20\" height=\"40\" viewBox=\"10 -10 20 40\">\
         <g transform=\"rotate(90 20 10)\"><rect width=\"40\" height=\"20\"/></g></svg>"
    );
}

#[test]
fn flip_with_offset_view_box() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='10 20 30 40'/>";
    assert_eq!(
        apply(svg, Transformation::FlipHorizontal),
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"10 20 30 40\">\
         <g transform=\"scale(-1 1) translate(-40 0)\"/></svg>"
    );
    assert_eq!(
        apply(svg, Transformation::FlipVertical),
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"10 20 30 40\">\
         <g transform=\"scale(1 -1) translate(0 -60)\"/></svg>"
    );
}

#[test]
fn transformation_resets_optimized() {
    let input_svg = std::fs::read_to_string("tests/files/close-icon.svg").unwrap();
    let mut session = Session::new();
    session.set_original(input_svg, "close-icon.svg".to_string());
    session.optimize().unwrap();

    let rotated = apply(&session.original, Transformation::Rotate);
    session.apply_transformation(rotated);
    assert!(session.compressed.is_empty());

    session.optimize().unwrap();
    let dims = svg_dimensions(&session.compressed).unwrap();
    assert_eq!(dims.view_box.as_deref(), Some("0 0 24 24"));
}
