//! Round-trip tests: encode then decode must preserve structure exactly.

use std::io::Cursor;

use dme_format::{MenuReader, MenuWriter, decode, encode, read_menu, write_menu};
use dme_model::{Category, Document, Entry};
use proptest::prelude::*;

/// Helper to write and read back a document through the streaming API.
fn roundtrip(document: &Document) -> Document {
    let mut buffer = Vec::new();
    MenuWriter::new(Cursor::new(&mut buffer))
        .write_document(document)
        .unwrap();
    MenuReader::new(Cursor::new(&buffer))
        .read_document()
        .unwrap()
}

#[test]
fn empty_document_roundtrip() {
    let doc = Document::new();
    let back = roundtrip(&doc);
    assert_eq!(back.category_count(), 0);
    assert!(doc.same_content(&back));
}

#[test]
fn single_category_single_entry_roundtrip() {
    let doc = Document::from_categories([Category::new("Sea")
        .with_entries([Entry::named("Outset Island", "sea").with_target(44, 0, 255)])]);
    let back = roundtrip(&doc);
    assert!(doc.same_content(&back));
    let entry = &back.categories()[0].entries()[0];
    assert_eq!(entry.display_name, "Outset Island");
    assert_eq!(entry.layer, 255);
}

#[test]
fn many_categories_with_empty_ones_roundtrip() {
    let doc = Document::from_categories([
        Category::new("Empty first"),
        Category::new("Dungeons").with_entries([
            Entry::named("Dragon Roost Cavern", "M_NewD2").with_target(0, 0, 0),
            Entry::named("Forbidden Woods", "kindan").with_target(1, 2, 3),
            Entry::named("Tower of the Gods", "Siren"),
        ]),
        Category::new(""),
        Category::new("Höhlen ünïcödé").with_entries([Entry::named("Ice Ring", "MiniHyo")]),
        Category::new("Empty last"),
    ]);
    let back = roundtrip(&doc);
    assert!(doc.same_content(&back));
    assert_eq!(back.categories()[2].name, "");
    assert!(back.categories()[4].is_empty());
}

#[test]
fn file_roundtrip_sets_document_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Menu1.dat");
    let doc = Document::from_categories([
        Category::new("A").with_entries([Entry::named("a", "m")]),
    ]);

    write_menu(&path, &doc).unwrap();
    let back = read_menu(&path).unwrap();

    assert!(doc.same_content(&back));
    assert_eq!(back.name.as_deref(), Some("Menu1.dat"));
    assert_eq!(back.folder.as_deref(), Some(dir.path()));
}

#[test]
fn truncating_a_valid_image_never_decodes() {
    let doc = Document::from_categories([
        Category::new("Sea").with_entries([Entry::named("Outset", "sea")]),
        Category::new("Empty"),
    ]);
    let bytes = encode(&doc).unwrap();
    for len in 0..bytes.len() {
        assert!(decode(&bytes[..len]).is_err(), "prefix of length {len} decoded");
    }
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    (".{0,12}", "[A-Za-z0-9_]{0,8}", any::<u8>(), any::<u8>(), any::<u8>()).prop_map(
        |(display, map, room, spawn, layer)| {
            Entry::named(display, map).with_target(room, spawn, layer)
        },
    )
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec(
        (".{0,10}", prop::collection::vec(entry_strategy(), 0..6)),
        0..6,
    )
    .prop_map(|categories| {
        Document::from_categories(
            categories
                .into_iter()
                .map(|(name, entries)| Category::new(name).with_entries(entries)),
        )
    })
}

proptest! {
    #[test]
    fn encode_decode_preserves_structure(doc in document_strategy()) {
        let bytes = encode(&doc).unwrap();
        let back = decode(&bytes).unwrap();
        prop_assert!(doc.same_content(&back));
    }
}

#[cfg(unix)]
#[test]
fn read_menu_with_non_utf8_name_stays_untitled() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"menu\xff.dat"));
    let doc = Document::from_categories([Category::new("Sea")]);
    std::fs::write(&path, encode(&doc).unwrap()).unwrap();

    let back = read_menu(&path).unwrap();
    assert!(doc.same_content(&back));
    assert_eq!(back.name, None);
    assert_eq!(back.display_name(), "Untitled");
}
