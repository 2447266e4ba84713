// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Failed to read or write a file.
    Io(std::io::Error),

    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// The input doesn't look like SVG.
    NotAnSvg,

    /// Failed to parse or optimize SVG.
    Svg(svgtidy::Error),

    /// Failed to render SVG.
    RenderingFailed(String),

    /// The export size is zero or too big.
    InvalidSize,

    /// Failed to encode a raster image.
    EncodingFailed(String),

    /// Failed to (de)serialize JSON.
    Json(serde_json::Error),

    /// An unknown optimization plugin.
    UnknownPlugin(svgtidy::UnknownPlugin),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<svgtidy::Error> for Error {
    fn from(e: svgtidy::Error) -> Self {
        Error::Svg(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<svgtidy::UnknownPlugin> for Error {
    fn from(e: svgtidy::UnknownPlugin) -> Self {
        Error::UnknownPlugin(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "{}", e),
            Error::NotAnUtf8Str => write!(f, "provided data has not an UTF-8 encoding"),
            Error::MalformedGZip => write!(f, "provided data has a malformed GZip content"),
            Error::NotAnSvg => write!(f, "provided data is not an SVG"),
            Error::Svg(ref e) => write!(f, "{}", e),
            Error::RenderingFailed(ref e) => write!(f, "failed to render SVG cause {}", e),
            Error::InvalidSize => write!(f, "target size is zero or too big"),
            Error::EncodingFailed(ref e) => write!(f, "failed to encode an image cause {}", e),
            Error::Json(ref e) => write!(f, "{}", e),
            Error::UnknownPlugin(ref e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}
