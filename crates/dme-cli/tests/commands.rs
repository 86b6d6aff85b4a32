use std::path::Path;

use dme_cli::commands::{self, ShowFormat};
use dme_cli::settings::Settings;
use dme_model::{Category, Document, Entry};
use dme_session::{ConfirmPolicy, FilterOptions};
use tempfile::TempDir;

fn write_sample(path: &Path) {
    let document = Document::from_categories([
        Category::new("Sea").with_entries([
            Entry::named("Outset Island", "sea").with_target(44, 0, 255),
            Entry::named("Dragon Roost Island", "sea").with_target(13, 0, 255),
        ]),
        Category::new("Dungeons").with_entries([
            Entry::named("Forsaken Fortress", "MajyuE"),
            Entry::named("Tower of the Gods", "Siren"),
        ]),
        Category::new("Unused"),
    ]);
    dme_format::write_menu(path, &document).unwrap();
}

#[test]
fn show_renders_every_category() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    write_sample(&path);

    let rendered = commands::show(&path, ShowFormat::Table).unwrap();
    assert!(rendered.starts_with("menu.dat (3 categories, 4 entries)"));
    for name in ["Sea", "Dungeons", "Unused", "Outset Island", "Tower of the Gods"] {
        assert!(rendered.contains(name), "missing {name}");
    }
}

#[test]
fn show_json_keeps_order_and_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    write_sample(&path);

    let json = commands::show(&path, ShowFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "menu.dat");
    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[1]["name"], "Dungeons");
    assert_eq!(categories[0]["entries"][0]["room"], 44);
    assert_eq!(categories[1]["entries"][1]["map_name"], "Siren");
}

#[test]
fn search_matches_display_and_map_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    write_sample(&path);

    let (hits, rendered) = commands::search(&path, "island", FilterOptions::default()).unwrap();
    assert_eq!(hits, 2);
    assert!(rendered.contains("Dragon Roost Island"));

    let (hits, rendered) = commands::search(&path, "SIREN", FilterOptions::default()).unwrap();
    assert_eq!(hits, 1);
    assert!(rendered.contains("Dungeons"));

    let strict = FilterOptions {
        case_sensitive: true,
    };
    let (hits, rendered) = commands::search(&path, "SIREN", strict).unwrap();
    assert_eq!(hits, 0);
    assert_eq!(rendered, "No entries match \"SIREN\".");
}

#[test]
fn find_pairs_entries_with_categories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    write_sample(&path);
    let document = dme_format::read_menu(&path).unwrap();

    let hits = commands::find(&document, "o", FilterOptions::default());
    let pairs: Vec<_> = hits
        .iter()
        .map(|hit| (hit.category, hit.entry.display_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Sea", "Outset Island"),
            ("Sea", "Dragon Roost Island"),
            ("Dungeons", "Forsaken Fortress"),
            ("Dungeons", "Tower of the Gods"),
        ]
    );
}

#[test]
fn create_writes_empty_categories_and_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.dat");

    let document = commands::create(&path, &["Sea".to_string(), "Caves".to_string()]).unwrap();
    assert_eq!(document.display_name(), "new.dat");

    let read = dme_format::read_menu(&path).unwrap();
    let names: Vec<_> = read.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Sea", "Caves"]);
    assert_eq!(read.entry_count(), 0);

    let error = commands::create(&path, &[]).unwrap_err();
    assert!(error.to_string().contains("already exists"));
}

#[test]
fn unreadable_file_reports_a_hint() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.dat");
    std::fs::write(&path, b"garbage bytes here").unwrap();

    let error = commands::show(&path, ShowFormat::Table).unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("cannot read"), "{message}");
    assert!(message.contains("hint: Make sure you selected a .dat debug menu file."));
}

#[test]
fn settings_round_trip_and_fallback() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Settings::default();
    settings.session.confirm = ConfirmPolicy::WhenModified;
    settings.session.filter.case_sensitive = true;
    settings.recent.add(dir.path().join("a.dat"));
    settings.save_to(&path).unwrap();
    assert_eq!(Settings::load_from(&path), settings);

    std::fs::write(&path, "session = 5").unwrap();
    assert_eq!(Settings::load_from(&path), Settings::default());
    assert_eq!(
        Settings::load_from(&dir.path().join("missing.toml")),
        Settings::default()
    );
}
