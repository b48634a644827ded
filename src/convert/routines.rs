//! Conversion routines
//!
//! Each routine reads one validated input path and writes the given
//! output path using direct file I/O or an in-process rendering library.
//! No routine ever builds a shell command or spawns a process.

use crate::error::RoutineError;
use image::{DynamicImage, ImageFormat};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, RawImage, TextItem,
    XObjectTransform,
};
use std::fs;
use std::io::Cursor;
use std::path::Path;

// Letter-size page, in PDF points and in millimeters
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;

// Image pages: 0.5 inch margin
const IMAGE_MARGIN_PT: f32 = 36.0;

// Text pages: 0.75 inch margin, Helvetica 10pt on a 14pt line
const TEXT_MARGIN_PT: f32 = 54.0;
const FONT_SIZE_PT: f32 = 10.0;
const LINE_HEIGHT_PT: f32 = 14.0;
const MAX_LINE_CHARS: usize = 90;

/// Render an image centered and uniformly scaled onto a single
/// letter-size page.
pub fn image_to_pdf(input: &Path, output: &Path) -> Result<(), RoutineError> {
    let bytes = fs::read(input)?;

    // printpdf decodes PNG and JPEG directly; other inputs are transcoded
    // in memory first
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let bytes = match ext.as_deref() {
        Some("png") | Some("jpg") | Some("jpeg") => bytes,
        _ => transcode_to_png(&bytes)?,
    };

    let mut warnings = Vec::new();
    let img = RawImage::decode_from_bytes(&bytes, &mut warnings)
        .map_err(|e| RoutineError::Decode(e.to_string()))?;

    // At 72 dpi one pixel maps to one point
    let width_pt = img.width as f32;
    let height_pt = img.height as f32;
    let available_width = PAGE_WIDTH_PT - 2.0 * IMAGE_MARGIN_PT;
    let available_height = PAGE_HEIGHT_PT - 2.0 * IMAGE_MARGIN_PT;
    let scale = (available_width / width_pt).min(available_height / height_pt);
    let x = (PAGE_WIDTH_PT - width_pt * scale) / 2.0;
    let y = (PAGE_HEIGHT_PT - height_pt * scale) / 2.0;

    let mut doc = PdfDocument::new(doc_title(input));
    let image_id = doc.add_image(&img);
    let ops = vec![Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(y)),
            rotate: None,
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(72.0),
        },
    }];
    let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops);

    let pdf = doc
        .with_pages(vec![page])
        .save(&PdfSaveOptions::default(), &mut warnings);
    fs::write(output, pdf)?;
    Ok(())
}

/// Paginate a text file line-by-line onto letter-size pages.
pub fn text_to_pdf(input: &Path, output: &Path) -> Result<(), RoutineError> {
    let raw = fs::read(input)?;
    let text = String::from_utf8_lossy(&raw);

    let mut pages = Vec::new();
    let mut ops = text_page_ops();
    let mut y = PAGE_HEIGHT_PT - TEXT_MARGIN_PT;

    for line in text.lines() {
        if y < TEXT_MARGIN_PT {
            ops.push(Op::EndTextSection);
            let full_page = std::mem::replace(&mut ops, text_page_ops());
            pages.push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), full_page));
            y = PAGE_HEIGHT_PT - TEXT_MARGIN_PT;
        }

        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(clip_line(line))],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::AddLineBreak);
        y -= LINE_HEIGHT_PT;
    }

    ops.push(Op::EndTextSection);
    pages.push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));

    let mut warnings = Vec::new();
    let pdf = PdfDocument::new(doc_title(input))
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings);
    fs::write(output, pdf)?;
    Ok(())
}

/// Re-encode an image as PNG.
pub fn image_to_png(input: &Path, output: &Path) -> Result<(), RoutineError> {
    let img = image::open(input).map_err(|e| RoutineError::Decode(e.to_string()))?;
    img.save_with_format(output, ImageFormat::Png)
        .map_err(|e| RoutineError::Encode(e.to_string()))?;
    Ok(())
}

/// Re-encode an image as JPEG, flattening any alpha channel first.
pub fn image_to_jpg(input: &Path, output: &Path) -> Result<(), RoutineError> {
    let img = image::open(input).map_err(|e| RoutineError::Decode(e.to_string()))?;
    let img = flatten_alpha(img);
    img.save_with_format(output, ImageFormat::Jpeg)
        .map_err(|e| RoutineError::Encode(e.to_string()))?;
    Ok(())
}

/// Byte-for-byte copy for same-format requests. Direct file I/O.
pub fn copy_file(input: &Path, output: &Path) -> Result<(), RoutineError> {
    fs::copy(input, output)?;
    Ok(())
}

fn text_page_ops() -> Vec<Op> {
    vec![
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point {
                x: Pt(TEXT_MARGIN_PT),
                y: Pt(PAGE_HEIGHT_PT - TEXT_MARGIN_PT),
            },
        },
        Op::SetFontSizeBuiltinFont {
            size: Pt(FONT_SIZE_PT),
            font: BuiltinFont::Helvetica,
        },
        Op::SetLineHeight {
            lh: Pt(LINE_HEIGHT_PT),
        },
    ]
}

/// Truncate a line to the fixed character budget, marking the cut.
fn clip_line(line: &str) -> String {
    if line.chars().count() > MAX_LINE_CHARS {
        let clipped: String = line.chars().take(MAX_LINE_CHARS).collect();
        format!("{}...", clipped)
    } else {
        line.to_string()
    }
}

/// JPEG has no alpha channel: composite transparent pixels over white.
fn flatten_alpha(img: DynamicImage) -> DynamicImage {
    if !img.color().has_alpha() {
        return img;
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = image::RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }
    DynamicImage::ImageRgb8(rgb)
}

fn transcode_to_png(bytes: &[u8]) -> Result<Vec<u8>, RoutineError> {
    let img = image::load_from_memory(bytes).map_err(|e| RoutineError::Decode(e.to_string()))?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| RoutineError::Encode(e.to_string()))?;
    Ok(out)
}

fn doc_title(input: &Path) -> &str {
    input.file_stem().and_then(|s| s.to_str()).unwrap_or("document")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_long_lines_with_a_marker() {
        let long = "x".repeat(120);
        let clipped = clip_line(&long);
        assert_eq!(clipped.chars().count(), MAX_LINE_CHARS + 3);
        assert!(clipped.ends_with("..."));

        assert_eq!(clip_line("short"), "short");
    }

    #[test]
    fn flattening_removes_alpha() {
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([100, 150, 200, 128]));
        let flat = flatten_alpha(DynamicImage::ImageRgba8(rgba));
        assert!(!flat.color().has_alpha());
    }

    #[test]
    fn opaque_images_pass_through_flattening() {
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let flat = flatten_alpha(DynamicImage::ImageRgb8(rgb));
        assert_eq!(flat.as_rgb8().unwrap().get_pixel(0, 0), &image::Rgb([10, 20, 30]));
    }
}
