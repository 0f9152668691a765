//! Three-pass PDF recovery through `File`.

#![cfg(feature = "pdf")]

use rummage::{ExtractionConfig, ExtractionStrategy, File};

mod helpers;

use helpers::pdf::{encrypted_pdf, pdf};

/// Objects in a one-page fixture: pages, font, resources, content, page, catalog.
const ONE_PAGE_OBJECTS: usize = 6;

#[test]
fn test_pass_order_single_page() {
    let bytes = pdf(&["Hello World"]);
    let mut file = File::load(bytes.clone(), "hello.pdf");

    assert_eq!(file.mime_type(), "application/pdf");
    assert_eq!(file.strategy(), ExtractionStrategy::Pdf);

    let strings = file.parse().unwrap().to_vec();
    assert_eq!(strings.len(), 1 + ONE_PAGE_OBJECTS + 1);

    assert_eq!(strings[0], "Hello World");

    let objects = &strings[1..=ONE_PAGE_OBJECTS];
    assert!(objects[0].starts_with("<</Type /Pages"));
    assert!(objects.iter().any(|o| o.contains("/BaseFont /Helvetica")));
    assert!(objects.iter().any(|o| o.contains("stream BT") && o.contains("(Hello World) Tj")));
    assert!(objects.iter().any(|o| o.starts_with("<</Type /Catalog")));

    let raw = strings.last().unwrap();
    assert!(raw.starts_with("%PDF-1.5"));
}

#[test]
fn test_one_string_per_page() {
    let mut file = File::load(pdf(&["first page", "second page"]), "two.pdf");
    let strings = file.parse().unwrap();

    assert_eq!(strings[0], "first page");
    assert_eq!(strings[1], "second page");
}

#[test]
fn test_probe_limit_from_config() {
    let config: ExtractionConfig = toml::from_str("[pdf]\nmax_object_probes = 2\n").unwrap();
    let mut file = File::load(pdf(&["limited"]), "limited.pdf");

    let strings = file.parse_with_config(&config).unwrap();
    assert_eq!(strings.len(), 1 + 2 + 1);
    assert_eq!(strings[0], "limited");
}

#[test]
fn test_probe_limit_cannot_exceed_cap() {
    let config: ExtractionConfig = toml::from_str("[pdf]\nmax_object_probes = 100000\n").unwrap();
    assert_eq!(config.pdf.probe_limit(), 1000);
}

#[test]
fn test_page_inherits_cyclic_parent_without_looping() {
    let mut file = File::load(pdf(&["cycle"]), "cycle.pdf");
    let strings = file.parse().unwrap();

    let page = strings
        .iter()
        .find(|s| s.starts_with("<</Type /Page "))
        .expect("page object dumped");
    assert!(page.contains("/Parent <</Type /Pages"));
    assert!(page.contains("R"));
}

#[test]
fn test_urls_deduplicated_across_passes() {
    let mut file = File::load(pdf(&["Visit https://example.com/docs today"]), "links.pdf");
    file.parse().unwrap();

    assert_eq!(file.url_extract(), vec!["https://example.com/docs".to_string()]);
}

#[test]
fn test_truncated_pdf_falls_back_to_raw() {
    let bytes = pdf(&["truncated"]);
    let cut = bytes[..bytes.len() / 3].to_vec();
    let mut file = File::load(cut, "cut.pdf");

    assert_eq!(file.strategy(), ExtractionStrategy::Pdf);
    let strings = file.parse().unwrap();
    assert!(!strings.is_empty());
    assert!(strings.last().unwrap().starts_with("%PDF-1.5"));
}

#[test]
fn test_encrypted_with_empty_user_password() {
    let mut file = File::load(encrypted_pdf(&["Secret Hello"], ""), "secret.pdf");
    let strings = file.parse().unwrap().to_vec();

    // Six document objects plus the encryption dictionary.
    assert_eq!(strings.len(), 1 + ONE_PAGE_OBJECTS + 1 + 1);
    assert_eq!(strings[0], "Secret Hello");

    let objects = &strings[1..strings.len() - 1];
    assert!(objects.iter().any(|o| o.contains("(Secret Hello) Tj")));
    assert!(objects.iter().any(|o| o.contains("/Filter /Standard")));

    let raw = strings.last().unwrap();
    assert!(raw.starts_with("%PDF-1.5"));
    assert!(!raw.contains("Secret Hello"));
}

#[test]
fn test_encrypted_with_user_password_keeps_raw_pass() {
    let mut file = File::load(encrypted_pdf(&["Locked away"], "hunter2"), "locked.pdf");
    let strings = file.parse().unwrap();

    assert!(!strings.is_empty());
    assert!(strings.last().unwrap().starts_with("%PDF-1.5"));
    assert!(strings.iter().all(|s| !s.contains("Locked away")));
}
