// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raster export.

use resvg::{tiny_skia, usvg};
use svgtidy::numbers::parse_leading_number;
use svgtidy::{Document, SVG_NS};

use crate::dimensions::view_box_values;
use crate::Error;

/// The default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.95;

/// The default export scale.
pub const DEFAULT_EXPORT_SCALE: f64 = 2.0;

/// Preset export scales.
pub const EXPORT_SCALE_OPTIONS: &[f64] = &[0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

/// A maximum difference between a scale and a preset.
pub const SCALE_MATCH_THRESHOLD: f64 = 0.01;

/// A base size used by [`ExportSize::Auto`] when SVG has no size.
pub const DEFAULT_DIMENSION: f64 = 1024.0;

/// The minimal larger side of an [`ExportSize::Auto`] image.
pub const MIN_EXPORT_DIMENSION: f64 = 512.0;

/// A base size used by scaled exports when SVG has no size.
pub const DEFAULT_SVG_DIMENSION: f64 = 100.0;

/// An output image format.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ExportFormat {
    /// PNG with transparency.
    Png,
    /// JPEG on a white background.
    Jpeg {
        /// Quality in a 0..1 range.
        quality: f32,
    },
}

impl ExportFormat {
    /// Returns a file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg { .. } => "jpg",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            _ => Err(format!("unsupported format '{}'", s)),
        }
    }
}

/// An output image size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ExportSize {
    /// The SVG size, scaled up so the larger side is at least 512 pixels.
    Auto,
    /// The SVG size multiplied by a factor.
    Scale(f64),
    /// Scale to width.
    Width(u32),
    /// Scale to height.
    Height(u32),
    /// Exact size. The aspect ratio is not preserved.
    Exact(u32, u32),
}

impl Default for ExportSize {
    fn default() -> Self {
        ExportSize::Scale(DEFAULT_EXPORT_SCALE)
    }
}

/// Returns a preset scale close to `value`.
pub fn matching_scale(value: f64) -> Option<f64> {
    EXPORT_SCALE_OPTIONS
        .iter()
        .copied()
        .find(|s| (s - value).abs() < SCALE_MATCH_THRESHOLD)
}

/// Returns the SVG size used as an export base.
///
/// `width` and `height` when both are set, otherwise the `viewBox` size.
/// Missing or invalid values are replaced with `default`.
pub fn base_size(text: &str, default: f64) -> (f64, f64) {
    let doc = match Document::parse(text) {
        Ok(doc) => doc,
        Err(_) => return (default, default),
    };

    let svg = doc.root_element();
    let mut width = doc.attribute(svg, "width").filter(|s| !s.is_empty());
    let mut height = doc.attribute(svg, "height").filter(|s| !s.is_empty());
    if width.is_none() || height.is_none() {
        if let Some(values) = doc.attribute(svg, "viewBox").and_then(view_box_values) {
            width = Some(values[2]);
            height = Some(values[3]);
        }
    }

    let parse = |s: Option<&str>| s.and_then(parse_leading_number).unwrap_or(default);
    (parse(width), parse(height))
}

/// Resolves an export size in pixels.
pub fn resolve_size(text: &str, size: ExportSize) -> (u32, u32) {
    let round = |n: f64| n.round().max(0.0) as u32;

    match size {
        ExportSize::Auto => {
            let (w, h) = base_size(text, DEFAULT_DIMENSION);
            let scale = (MIN_EXPORT_DIMENSION / w.max(h)).max(1.0);
            (round(w * scale), round(h * scale))
        }
        ExportSize::Scale(scale) => {
            let (w, h) = base_size(text, DEFAULT_SVG_DIMENSION);
            (round(w * scale), round(h * scale))
        }
        ExportSize::Width(width) => {
            let (w, h) = base_size(text, DEFAULT_SVG_DIMENSION);
            (width, round(width as f64 / (w / h)))
        }
        ExportSize::Height(height) => {
            let (w, h) = base_size(text, DEFAULT_SVG_DIMENSION);
            (round(height as f64 * (w / h)), height)
        }
        ExportSize::Exact(w, h) => (w, h),
    }
}

/// Renders SVG into an encoded raster image.
pub fn export(text: &str, format: ExportFormat, size: ExportSize) -> Result<Vec<u8>, Error> {
    let (width, height) = resolve_size(text, size);
    let pixmap = render(text, width, height, format)?;

    match format {
        ExportFormat::Png => pixmap
            .encode_png()
            .map_err(|e| Error::EncodingFailed(e.to_string())),
        ExportFormat::Jpeg { quality } => encode_jpeg(&pixmap, quality),
    }
}

fn render(
    text: &str,
    width: u32,
    height: u32,
    format: ExportFormat,
) -> Result<tiny_skia::Pixmap, Error> {
    let text = with_namespace(text);

    let mut opt = usvg::Options::default();
    // Fonts loading is pretty expensive, so perform it only when needed.
    if text.contains("<text") {
        opt.fontdb_mut().load_system_fonts();
    }

    let tree =
        usvg::Tree::from_str(&text, &opt).map_err(|e| Error::RenderingFailed(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(Error::InvalidSize)?;
    if let ExportFormat::Jpeg { .. } = format {
        pixmap.fill(tiny_skia::Color::WHITE);
    }

    // The image is stretched to the target size, like a canvas does.
    let size = tree.size();
    let ts = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, ts, &mut pixmap.as_mut());

    Ok(pixmap)
}

fn with_namespace(text: &str) -> String {
    let declared = text.contains(&format!("xmlns=\"{}\"", SVG_NS))
        || text.contains(&format!("xmlns='{}'", SVG_NS));
    if declared {
        text.to_string()
    } else {
        text.replacen("<svg", &format!("<svg xmlns=\"{}\"", SVG_NS), 1)
    }
}

fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: f32) -> Result<Vec<u8>, Error> {
    // The pixmap is opaque, so premultiplied colors are the same as straight ones.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let quality = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
    let mut buf = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.max(1));
    encoder
        .encode(&rgb, pixmap.width(), pixmap.height(), image::ExtendedColorType::Rgb8)
        .map_err(|e| Error::EncodingFailed(e.to_string()))?;

    Ok(buf)
}

/// Replaces the first `.svg` occurrence with a format extension.
pub fn exported_file_name(name: &str, format: ExportFormat) -> String {
    name.replacen(".svg", &format!(".{}", format.extension()), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 24 12'>\
                       <rect width='24' height='12' fill='red'/></svg>";

    #[test]
    fn sizes() {
        assert_eq!(resolve_size(SVG, ExportSize::Auto), (512, 256));
        assert_eq!(resolve_size(SVG, ExportSize::Scale(2.0)), (48, 24));
        assert_eq!(resolve_size(SVG, ExportSize::Width(100)), (100, 50));
        assert_eq!(resolve_size(SVG, ExportSize::Height(100)), (200, 100));
        assert_eq!(resolve_size(SVG, ExportSize::Exact(10, 30)), (10, 30));
        assert_eq!(resolve_size("<svg", ExportSize::Auto), (1024, 1024));
        assert_eq!(
            resolve_size("<svg xmlns='http://www.w3.org/2000/svg'/>", ExportSize::Scale(0.5)),
            (50, 50)
        );
    }

    #[test]
    fn scales() {
        assert_eq!(matching_scale(2.004), Some(2.0));
        assert_eq!(matching_scale(2.5), None);
    }

    #[test]
    fn names() {
        assert_eq!(exported_file_name("a.svg", ExportFormat::Png), "a.png");
        assert_eq!(
            exported_file_name("a.svg", ExportFormat::Jpeg { quality: 0.5 }),
            "a.jpg"
        );
    }

    #[test]
    fn namespace() {
        assert_eq!(with_namespace("<svg/>"), "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
        assert_eq!(with_namespace(SVG), SVG);
    }

    #[test]
    fn png() {
        let data = export(SVG, ExportFormat::Png, ExportSize::Scale(1.0)).unwrap();
        assert!(data.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn jpeg() {
        let data = export(SVG, ExportFormat::Jpeg { quality: 0.95 }, ExportSize::Scale(1.0)).unwrap();
        assert!(data.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn zero_size() {
        let result = export(SVG, ExportFormat::Png, ExportSize::Exact(0, 10));
        assert!(matches!(result, Err(Error::InvalidSize)));
    }
}
