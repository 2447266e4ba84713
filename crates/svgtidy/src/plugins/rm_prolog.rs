// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::prelude::*;

pub fn remove_doctype(doc: &mut Document) {
    doc.doctype = None;
}

pub fn remove_xml_proc_inst(doc: &mut Document) {
    // `xml-stylesheet` and friends are not a part of the declaration.
    doc.declaration = None;
}

pub fn remove_comments(doc: &mut Document) {
    doc.remove_all(|doc, id| match doc.kind(id) {
        // Legal comments, like `<!--! (c) Author -->`, are preserved.
        NodeKind::Comment(ref text) => !text.starts_with('!'),
        _ => false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOptions;

    #[test]
    fn legal_comments_are_kept() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'><!-- a --><!--! b --></svg>",
        )
        .unwrap();
        remove_comments(&mut doc);
        assert_eq!(
            doc.to_string(&WriteOptions::default()),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><!--! b --></svg>"
        );
    }
}
