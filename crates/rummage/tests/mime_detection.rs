//! Content-based detection: totality, determinism and name independence.

use rummage::{File, detect_format, detect_format_with_window, select_strategy};

#[test]
fn test_signatures() {
    let cases: Vec<(&[u8], &str, &str)> = vec![
        (b"%PDF-1.7\n", "application/pdf", "pdf"),
        (b"PK\x03\x04\x14\x00\x00\x00\x08\x00", "application/zip", "zip"),
        (b"\x1f\x8b\x08\x00\x00\x00\x00\x00", "application/gzip", "gz"),
        (b"BZh91AY&SY", "application/x-bzip2", "bz2"),
        (b"GIF89a\x01\x00\x01\x00", "image/gif", "gif"),
    ];

    for (bytes, mime, extension) in cases {
        let detected = detect_format(bytes);
        assert_eq!(detected.mime_type, mime, "mime for {:?}", bytes);
        assert_eq!(detected.extension, extension, "extension for {:?}", bytes);
    }
}

#[test]
fn test_heuristic_results_have_unknown_extension() {
    let detected = detect_format(b"plain words only");
    assert_eq!(detected.mime_type, "text/plain; charset=utf-8");
    assert_eq!(detected.extension, "unknown");
}

#[test]
fn test_detection_is_total_and_deterministic() {
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        vec![0x00],
        vec![0xff; 3],
        (0u8..=255).collect(),
        b"<?xml version=\"1.0\"?><a/>".to_vec(),
    ];

    for input in inputs {
        let first = detect_format(&input);
        let second = detect_format(&input);
        assert_eq!(first, second);
        assert!(!first.mime_type.is_empty());
        let _ = select_strategy(&first.mime_type);
    }
}

#[test]
fn test_window_only_affects_heuristics() {
    assert_eq!(detect_format_with_window(b"%PDF-1.4", 1).mime_type, "application/pdf");
}

#[test]
fn test_name_is_ignored() {
    let bytes = b"\x1f\x8b\x08\x00\x00\x00\x00\x00".to_vec();
    let a = File::load(bytes.clone(), "archive.tar.gz");
    let b = File::load(bytes, "document.docx");

    assert_eq!(a.format(), b.format());
    assert_eq!(a.strategy(), b.strategy());
}
