// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Loading SVG from files, stdin and pasted text.

use std::io::Read;
use std::path::Path;

use base64::Engine;

use crate::Error;

/// The SVG MIME type.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// A file name used for pasted markup.
pub const PASTED_FILE_NAME: &str = "pasted.svg";

/// A prefix of a base64-encoded SVG data URI.
pub const BASE64_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// A loaded SVG.
#[derive(Clone, PartialEq, Debug)]
pub struct Source {
    /// A file name, without a directory.
    pub name: String,
    /// SVG markup.
    pub content: String,
}

impl Source {
    /// Loads SVG from a file.
    ///
    /// Compressed SVG (SVGZ) is decompressed automatically.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = read_file_as_text(path)?;
        if !is_svg_content(&content) {
            return Err(Error::NotAnSvg);
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| PASTED_FILE_NAME.to_string());

        Ok(Source { name, content })
    }

    /// Loads SVG from stdin, the same way as [`Source::from_paste`].
    pub fn from_stdin() -> Result<Self, Error> {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf)?;
        let text = decode_data(buf)?;
        Self::from_paste(&text).ok_or(Error::NotAnSvg)
    }

    /// Accepts pasted markup or a base64 SVG data URI.
    ///
    /// Returns `None` when the text is neither.
    pub fn from_paste(text: &str) -> Option<Self> {
        let content = if is_svg_content(text) {
            text.to_string()
        } else {
            extract_svg_from_base64(text.trim())?
        };

        Some(Source {
            name: PASTED_FILE_NAME.to_string(),
            content,
        })
    }

    /// Returns a file name for the optimized SVG.
    pub fn optimized_name(&self) -> String {
        optimized_file_name(&self.name)
    }
}

/// Checks that a file is an SVG file by its MIME type or extension.
pub fn is_svg_file(path: &Path, mime: Option<&str>) -> bool {
    if mime == Some(SVG_MIME_TYPE) {
        return true;
    }

    path.to_str().map(|s| s.ends_with(".svg")) == Some(true)
}

/// Reads a file as UTF-8 text, decompressing SVGZ.
pub fn read_file_as_text(path: &Path) -> Result<String, Error> {
    let data = std::fs::read(path)?;
    decode_data(data)
}

fn decode_data(data: Vec<u8>) -> Result<String, Error> {
    let data = if data.starts_with(&[0x1f, 0x8b]) {
        decompress_svgz(&data)?
    } else {
        data
    };

    String::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)
}

/// Decompresses an SVGZ data.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}

/// Checks that the text contains an `svg` element.
pub fn is_svg_content(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with("<svg") || trimmed.contains("<svg")
}

/// Decodes a `data:image/svg+xml;base64,` URI.
pub fn extract_svg_from_base64(text: &str) -> Option<String> {
    let data = text.strip_prefix(BASE64_DATA_URI_PREFIX)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(data).ok()?;
    String::from_utf8(bytes).ok()
}

/// Replaces the first `.svg` occurrence with `.optimized.svg`.
pub fn optimized_file_name(name: &str) -> String {
    name.replacen(".svg", ".optimized.svg", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_files() {
        assert!(is_svg_file(Path::new("icon.svg"), None));
        assert!(is_svg_file(Path::new("icon"), Some("image/svg+xml")));
        assert!(!is_svg_file(Path::new("icon.png"), Some("image/png")));
        assert!(!is_svg_file(Path::new("icon.svgz"), None));
    }

    #[test]
    fn svg_content() {
        assert!(is_svg_content("  <svg/>"));
        assert!(is_svg_content("<?xml version='1.0'?><svg/>"));
        assert!(!is_svg_content("<html/>"));
    }

    #[test]
    fn base64_uri() {
        // `<svg/>`
        assert_eq!(
            extract_svg_from_base64("data:image/svg+xml;base64,PHN2Zy8+").as_deref(),
            Some("<svg/>")
        );
        assert_eq!(extract_svg_from_base64("PHN2Zy8+"), None);
        assert_eq!(extract_svg_from_base64("data:image/svg+xml;base64,!!"), None);
    }

    #[test]
    fn paste() {
        let source = Source::from_paste("data:image/svg+xml;base64,PHN2Zy8+").unwrap();
        assert_eq!(source.name, "pasted.svg");
        assert_eq!(source.content, "<svg/>");
        assert!(Source::from_paste("hello").is_none());
    }

    #[test]
    fn optimized_names() {
        assert_eq!(optimized_file_name("icon.svg"), "icon.optimized.svg");
        assert_eq!(optimized_file_name("icon"), "icon");
    }

    #[test]
    fn svgz() {
        use std::io::Write;

        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"<svg/>").unwrap();
        let data = encoder.finish().unwrap();
        assert_eq!(decode_data(data).unwrap(), "<svg/>");
        assert!(matches!(decode_data(vec![0x1f, 0x8b, 0]), Err(Error::MalformedGZip)));
    }
}
