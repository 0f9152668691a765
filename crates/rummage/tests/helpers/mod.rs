//! In-memory fixture builders shared by the integration tests.

#![allow(dead_code)]

#[cfg(feature = "archives")]
pub mod archives {
    use std::io::{Cursor, Write};
    use tar::{Builder as TarBuilder, EntryType, Header};
    use zip::write::{FileOptions, ZipWriter};

    /// Zip with the given entries; `None` content adds a directory.
    pub fn zip(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            let options = FileOptions::<'_, ()>::default();
            for (name, content) in entries {
                match content {
                    Some(data) => {
                        zip.start_file(*name, options).unwrap();
                        zip.write_all(data).unwrap();
                    }
                    None => zip.add_directory(*name, options).unwrap(),
                }
            }
            zip.finish().unwrap();
        }
        cursor.into_inner()
    }

    /// Tar with one directory entry followed by the given regular files.
    pub fn tar(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = TarBuilder::new(Vec::new());

        let mut dir = Header::new_gnu();
        dir.set_entry_type(EntryType::Directory);
        dir.set_size(0);
        dir.set_mode(0o755);
        builder.append_data(&mut dir, "data/", &[][..]).unwrap();

        for (name, content) in files {
            let mut header = Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            builder.append_data(&mut header, name, *content).unwrap();
        }

        builder.into_inner().unwrap()
    }

    pub fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    pub fn bzip2(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }
}

#[cfg(feature = "pdf")]
pub mod pdf {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, StringFormat, dictionary};

    /// A PDF with one page per entry, each showing its text in Helvetica.
    ///
    /// Object layout: 1 pages, 2 font, 3 resources, then a content stream and
    /// a page per entry, then the catalog.
    pub fn pdf(pages: &[&str]) -> Vec<u8> {
        save(build(pages))
    }

    /// Like [`pdf`], RC4-encrypted with `user_password` (owner password `owner`).
    /// The encryption dictionary becomes the last object.
    pub fn encrypted_pdf(pages: &[&str], user_password: &str) -> Vec<u8> {
        let mut doc = build(pages);
        doc.trailer.set(
            "ID",
            Object::Array(vec![
                Object::String(b"rummage-test-id1".to_vec(), StringFormat::Hexadecimal),
                Object::String(b"rummage-test-id2".to_vec(), StringFormat::Hexadecimal),
            ]),
        );
        let version = EncryptionVersion::V2 {
            document: &doc,
            owner_password: "owner",
            user_password,
            key_length: 128,
            permissions: Permissions::all(),
        };
        let state = EncryptionState::try_from(version).unwrap();
        doc.encrypt(&state).unwrap();
        save(doc)
    }

    fn save(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn build(pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        doc
    }
}
