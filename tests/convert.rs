use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use fileconv::FileStore;
use fileconv::convert::Converter;
use fileconv::error::ConvertError;
use tempfile::{TempDir, tempdir};

const TIMEOUT: Duration = Duration::from_secs(30);
const MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;

fn setup() -> (TempDir, Converter) {
    let dir = tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let converted = dir.path().join("converted");
    fs::create_dir_all(&uploads).unwrap();
    fs::create_dir_all(&converted).unwrap();
    let converter = Converter::new(&uploads, &converted, TIMEOUT).unwrap();
    (dir, converter)
}

fn write_upload(dir: &TempDir, name: &str, content: &[u8]) {
    fs::write(dir.path().join("uploads").join(name), content).unwrap();
}

fn converted_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join("converted").join(name)
}

fn converted_entries(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir.path().join("converted"))
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn write_test_png(dir: &TempDir, name: &str, alpha: u8) {
    let img = image::RgbaImage::from_pixel(32, 16, image::Rgba([200, 40, 40, alpha]));
    let path = dir.path().join("uploads").join(name);
    img.save_with_format(&path, image::ImageFormat::Png).unwrap();
}

fn assert_single_page_pdf(bytes: &[u8]) {
    assert_eq!(&bytes[0..4], b"%PDF", "PDF file missing magic header");
    let needle = b"/Count 1";
    assert!(
        bytes.windows(needle.len()).any(|w| w == needle),
        "PDF page tree does not report a single page"
    );
}

#[test]
fn text_to_pdf_renders_one_page_and_is_deletable() {
    let (dir, converter) = setup();
    write_upload(&dir, "report.txt", b"first line\nsecond line\nthird line\n");

    let result = converter.convert("report.txt", "pdf").unwrap();
    assert_eq!(result.output_filename.as_str(), "report.pdf");
    assert_eq!(result.output_path, converted_path(&dir, "report.pdf"));

    let bytes = fs::read(&result.output_path).unwrap();
    assert!(bytes.len() > 100, "output PDF is implausibly small");
    assert_single_page_pdf(&bytes);

    let store = FileStore::new(&dir.path().join("converted"), MAX_FILE_SIZE).unwrap();
    assert!(store.exists("report.pdf"));
    assert!(store.delete("report.pdf"));
    assert!(!store.exists("report.pdf"));
}

#[test]
fn long_text_paginates_to_more_than_one_page() {
    let (dir, converter) = setup();
    let many_lines = "a line of sample text\n".repeat(200);
    write_upload(&dir, "long.txt", many_lines.as_bytes());

    let result = converter.convert("long.txt", "pdf").unwrap();
    let bytes = fs::read(&result.output_path).unwrap();
    assert_eq!(&bytes[0..4], b"%PDF");
    let single_page = b"/Count 1";
    assert!(
        !bytes.windows(single_page.len()).any(|w| w == single_page),
        "200 lines should not fit on a single page"
    );
}

#[test]
fn image_to_pdf_produces_a_single_page() {
    let (dir, converter) = setup();
    write_test_png(&dir, "photo.png", 255);

    let result = converter.convert("photo.png", "pdf").unwrap();
    assert_eq!(result.output_filename.as_str(), "photo.pdf");

    let bytes = fs::read(&result.output_path).unwrap();
    assert_single_page_pdf(&bytes);
}

#[test]
fn png_to_jpg_flattens_transparency() {
    let (dir, converter) = setup();
    write_test_png(&dir, "photo.png", 128);

    let result = converter.convert("photo.png", "jpg").unwrap();
    assert_eq!(result.output_filename.as_str(), "photo.jpg");

    let reloaded = image::open(&result.output_path).unwrap();
    assert!(!reloaded.color().has_alpha());
}

#[test]
fn png_to_png_reencodes() {
    let (dir, converter) = setup();
    write_test_png(&dir, "photo.png", 255);

    let result = converter.convert("photo.png", "png").unwrap();
    assert!(image::open(&result.output_path).is_ok());
}

#[test]
fn same_format_text_copy_is_byte_identical() {
    let (dir, converter) = setup();
    write_upload(&dir, "notes.txt", b"alpha\nbeta\ngamma\n");

    converter.convert("notes.txt", "txt").unwrap();

    let original = fs::read(dir.path().join("uploads/notes.txt")).unwrap();
    let copied = fs::read(converted_path(&dir, "notes.txt")).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn same_format_pdf_copy_is_byte_identical() {
    let (dir, converter) = setup();
    write_upload(&dir, "notes.txt", b"some text\n");
    let generated = converter.convert("notes.txt", "pdf").unwrap();

    // Move the generated PDF into the upload root and copy it through
    let pdf_bytes = fs::read(&generated.output_path).unwrap();
    write_upload(&dir, "notes.pdf", &pdf_bytes);
    fs::remove_file(&generated.output_path).unwrap();

    let result = converter.convert("notes.pdf", "pdf").unwrap();
    assert_eq!(fs::read(&result.output_path).unwrap(), pdf_bytes);
}

#[test]
fn traversal_names_are_rejected_without_output() {
    let (dir, converter) = setup();

    for hostile in ["../../etc/passwd", "..\\..\\boot.ini", "/etc/passwd"] {
        let err = converter.convert(hostile, "pdf").unwrap_err();
        assert!(
            matches!(
                err,
                ConvertError::InvalidFilename(_) | ConvertError::AccessDenied(_)
            ),
            "unexpected error for {:?}: {:?}",
            hostile,
            err
        );
    }

    assert!(converted_entries(&dir).is_empty());
}

#[test]
fn missing_input_reports_not_found() {
    let (_dir, converter) = setup();
    assert!(matches!(
        converter.convert("photo.png", "pdf"),
        Err(ConvertError::NotFound(_))
    ));
}

#[test]
fn unknown_format_is_rejected_before_path_resolution() {
    let (dir, converter) = setup();

    // Even a hostile filename is not inspected once the format gate fails
    assert!(matches!(
        converter.convert("../../etc/passwd", "exe"),
        Err(ConvertError::UnsupportedFormat(_))
    ));

    write_upload(&dir, "note.txt", b"hello\n");
    assert!(matches!(
        converter.convert("note.txt", "exe"),
        Err(ConvertError::UnsupportedFormat(_))
    ));
    assert!(converted_entries(&dir).is_empty());
}

#[test]
fn pairings_outside_the_table_are_unsupported() {
    let (dir, converter) = setup();
    write_test_png(&dir, "photo.png", 255);
    write_upload(&dir, "doc.pdf", b"%PDF-1.4 stub");

    assert!(matches!(
        converter.convert("photo.png", "txt"),
        Err(ConvertError::UnsupportedConversion { .. })
    ));
    assert!(matches!(
        converter.convert("doc.pdf", "png"),
        Err(ConvertError::UnsupportedConversion { .. })
    ));
    assert!(converted_entries(&dir).is_empty());
}

#[test]
fn double_extension_names_are_rejected() {
    let (dir, converter) = setup();
    write_upload(&dir, "note.txt", b"hello\n");

    assert!(matches!(
        converter.convert("payload.exe.pdf", "pdf"),
        Err(ConvertError::InvalidFilename(_))
    ));
    assert!(converted_entries(&dir).is_empty());
}

#[test]
fn corrupt_input_fails_without_leaving_output() {
    let (dir, converter) = setup();
    write_upload(&dir, "broken.png", b"this is not an image at all");

    assert!(matches!(
        converter.convert("broken.png", "pdf"),
        Err(ConvertError::Failed(_))
    ));

    assert!(!converted_path(&dir, "broken.pdf").exists());
    assert!(converted_entries(&dir).is_empty());
}

#[test]
fn expired_conversions_report_timeout_and_expose_no_output() {
    let dir = tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let converted = dir.path().join("converted");
    fs::create_dir_all(&uploads).unwrap();
    fs::create_dir_all(&converted).unwrap();

    let big = "a line of text that keeps the renderer busy\n".repeat(20_000);
    fs::write(uploads.join("big.txt"), big).unwrap();

    let converter = Converter::new(&uploads, &converted, Duration::ZERO).unwrap();
    assert!(matches!(
        converter.convert("big.txt", "pdf"),
        Err(ConvertError::Timeout(_))
    ));
    assert!(!converted.join("big.pdf").exists());
}
