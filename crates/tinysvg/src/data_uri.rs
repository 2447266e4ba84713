// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Data URIs and size formatting.

use std::io::Write;

use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::source::BASE64_DATA_URI_PREFIX;

// Characters kept by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// Escapes that are safe to undo inside a quoted CSS `url()`.
const URL_ENCODING_REPLACEMENTS: &[(&str, &str)] =
    &[("%20", " "), ("%3D", "="), ("%3A", ":"), ("%2F", "/")];

const SIZE_UNITS: &[&str] = &["B", "KB", "MB"];

/// SVG encoded as data URIs.
#[derive(Clone, PartialEq, Debug)]
pub struct DataUri {
    /// Percent-encoded with readable characters restored.
    pub minified: String,
    /// Base64-encoded.
    pub base64: String,
    /// Fully percent-encoded.
    pub url_encoded: String,
    /// `minified` size in bytes.
    pub minified_size: usize,
    /// `base64` size in bytes.
    pub base64_size: usize,
    /// `url_encoded` size in bytes.
    pub url_encoded_size: usize,
}

/// Encodes SVG as data URIs.
pub fn svg_to_data_uri(svg: &str) -> DataUri {
    let encoded = encode_uri_component(svg);

    let mut minified_data = encoded.clone();
    for (from, to) in URL_ENCODING_REPLACEMENTS {
        minified_data = minified_data.replace(from, to);
    }

    let minified = format!("data:image/svg+xml,{}", minified_data);
    let base64 = format!(
        "{}{}",
        BASE64_DATA_URI_PREFIX,
        base64::engine::general_purpose::STANDARD.encode(svg)
    );
    let url_encoded = format!("data:image/svg+xml,{}", encoded);

    DataUri {
        minified_size: minified.len(),
        base64_size: base64.len(),
        url_encoded_size: url_encoded.len(),
        minified,
        base64,
        url_encoded,
    }
}

/// Percent-encodes a string the same way as `encodeURIComponent`.
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Formats a size with two fractional digits: `1.50 KB`.
pub fn format_bytes(bytes: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let (value, unit) = scale_bytes(bytes);
    format!("{:.2} {}", value, unit)
}

/// Formats a size without trailing zeros: `1.5 KB`.
pub fn format_file_size(bytes: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let (value, unit) = scale_bytes(bytes);
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", s, unit)
}

fn scale_bytes(bytes: usize) -> (f64, &'static str) {
    let bytes = bytes as f64;
    let i = (bytes.ln() / 1024f64.ln()).floor() as usize;
    let i = i.min(SIZE_UNITS.len() - 1);
    (bytes / 1024f64.powi(i as i32), SIZE_UNITS[i])
}

/// Returns the percentage of saved bytes.
///
/// Negative when the compressed SVG is bigger.
pub fn compression_rate(original: &str, compressed: &str) -> f64 {
    if original.is_empty() {
        return 0.0;
    }

    (1.0 - compressed.len() as f64 / original.len() as f64) * 100.0
}

/// Returns the gzip-compressed size.
pub fn gzip_size(text: &str) -> usize {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::best());
    // Writing into a `Vec` cannot fail.
    if encoder.write_all(text.as_bytes()).is_err() {
        return text.len();
    }

    encoder.finish().map(|data| data.len()).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding() {
        let uri = svg_to_data_uri("<svg a='1'/>");
        assert_eq!(uri.url_encoded, "data:image/svg+xml,%3Csvg%20a%3D'1'%2F%3E");
        assert_eq!(uri.minified, "data:image/svg+xml,%3Csvg a='1'/%3E");
        assert_eq!(uri.base64, "data:image/svg+xml;base64,PHN2ZyBhPScxJy8+");
        assert_eq!(uri.minified_size, uri.minified.len());
    }

    #[test]
    fn unicode() {
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g(h)"), "a-b_c.d!e~f*g(h)");
    }

    #[test]
    fn bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5120.00 MB");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024), "1 KB");
    }

    #[test]
    fn rate() {
        assert_eq!(compression_rate("aaaa", "a"), 75.0);
        assert_eq!(compression_rate("", "a"), 0.0);
    }

    #[test]
    fn gzip() {
        let text = "<svg>".repeat(100);
        assert!(gzip_size(&text) < text.len());
    }
}
