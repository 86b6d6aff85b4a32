//! End-to-end tests of the interactive shell driven by scripted input.

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::path::Path;
use std::rc::Rc;

use dme_cli::commands;
use dme_cli::settings::Settings;
use dme_cli::shell::{Console, Shell};
use dme_format::read_menu;
use dme_model::{Category, Document, Entry};
use dme_session::ConfirmPolicy;
use tempfile::TempDir;

/// Output sink the test can read after the shell owns the console.
#[derive(Clone, Default)]
struct Captured(Rc<RefCell<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn shell_with_script(script: &str) -> (Shell, Captured) {
    let output = Captured::default();
    let console = Console::new(Cursor::new(script.as_bytes().to_vec()), output.clone());
    (Shell::new(console, Settings::default()), output)
}

fn write_sample(path: &Path) {
    let document = Document::from_categories([
        Category::new("Sea").with_entries([
            Entry::named("Outset Island", "sea").with_target(44, 0, 255),
            Entry::named("Windfall Island", "sea").with_target(11, 0, 255),
        ]),
        Category::new("Dungeons").with_entries([Entry::named("Forsaken Fortress", "MajyuE")]),
    ]);
    dme_format::write_menu(path, &document).unwrap();
}

#[test]
fn edits_and_saves_an_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    commands::create(&path, &["Sea".to_string(), "Dungeons".to_string()]).unwrap();

    let script = format!(
        "open {}\nadd-entry\nedit name Outset Island\nedit map sea\nedit room 44\nsave\nquit\nn\n",
        path.display()
    );
    let (mut shell, output) = shell_with_script(&script);
    shell.run().unwrap();

    assert!(shell.session().is_terminated());
    let text = output.text();
    assert!(text.contains("Loaded menu.dat"), "{text}");
    assert!(text.contains("Saved file menu.dat"), "{text}");
    assert!(text.contains("Save changes to menu.dat?"), "{text}");

    let saved = read_menu(&path).unwrap();
    let sea = &saved.categories()[0];
    assert_eq!(sea.len(), 1);
    let entry = &sea.entries()[0];
    assert_eq!(entry.display_name, "Outset Island");
    assert_eq!(entry.map_name, "sea");
    assert_eq!(entry.room, 44);
    assert!(saved.categories()[1].is_empty());
}

#[test]
fn save_prompts_for_a_path_and_records_recent_files() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("config").join("settings.toml");
    let target = dir.path().join("fresh");

    let script = format!(
        "new\nadd-category Sea\nadd-entry\nsave\n{}\nquit\nn\n",
        target.display()
    );
    let output = Captured::default();
    let console = Console::new(Cursor::new(script.into_bytes()), output.clone());
    let mut shell =
        Shell::new(console, Settings::default()).with_settings_path(settings_path.clone());
    shell.run().unwrap();

    let saved_path = dir.path().join("fresh.dat");
    let text = output.text();
    assert!(text.contains("Save Untitled as"), "{text}");
    assert!(text.contains("Saved file fresh.dat"), "{text}");
    assert_eq!(read_menu(&saved_path).unwrap().entry_count(), 1);

    let recent: Vec<_> = shell.settings().recent.iter().collect();
    assert_eq!(recent, vec![saved_path.as_path()]);
    let persisted = Settings::load_from(&settings_path);
    assert_eq!(persisted.recent, shell.settings().recent);
}

#[test]
fn cancelling_the_quit_prompt_keeps_the_session_alive() {
    let (mut shell, output) = shell_with_script("new\nquit\nc\nstatus\n");
    shell.run().unwrap();

    assert!(!shell.session().is_terminated());
    assert!(shell.session().is_loaded());
    let text = output.text();
    assert!(text.contains("Quit cancelled."), "{text}");
    assert!(text.contains("Title:    Untitled - Debug Menu Editor"), "{text}");
    assert!(text.contains("Confirm:  Always"), "{text}");
}

#[test]
fn status_shows_the_configured_confirm_policy() {
    let mut settings = Settings::default();
    settings.session.confirm = ConfirmPolicy::WhenModified;
    let output = Captured::default();
    let console = Console::new(Cursor::new(b"status\n".to_vec()), output.clone());
    let mut shell = Shell::new(console, settings);
    shell.run().unwrap();

    let text = output.text();
    assert!(text.contains("Confirm:  When modified"), "{text}");
}

#[test]
fn errors_are_reported_and_the_shell_continues() {
    let (mut shell, output) =
        shell_with_script("add-entry\nfrobnicate\nnew\nselect-category 3\nedit room 300\nquit\nn\n");
    shell.run().unwrap();

    let text = output.text();
    assert_eq!(text.matches("error:").count(), 4, "{text}");
    assert!(text.contains("no document is loaded"), "{text}");
    assert!(text.contains("unknown command 'frobnicate'"), "{text}");
    assert!(text.contains("category index 3 is out of range"), "{text}");
    assert!(shell.session().is_terminated());
}

#[test]
fn failed_open_keeps_previous_document() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.dat");
    let bad = dir.path().join("bad.dat");
    write_sample(&good);
    std::fs::write(&bad, b"not a menu").unwrap();

    // The second open asks whether to save good.dat first.
    let (mut shell, output) = shell_with_script("n\n");
    shell.execute_line(&format!("open {}", good.display())).unwrap();
    let error = shell
        .execute_line(&format!("open {}", bad.display()))
        .unwrap_err();

    assert!(!error.to_string().is_empty());
    assert!(output.text().contains("Save changes to good.dat?"));
    assert_eq!(shell.session().document().unwrap().display_name(), "good.dat");
    let status = shell.session().status();
    assert!(status.starts_with("Exception while loading:"), "{status}");
}

#[test]
fn filter_searches_across_categories_and_clears() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    write_sample(&path);

    let (mut shell, output) = shell_with_script("");
    shell.execute_line(&format!("open {}", path.display())).unwrap();
    shell.execute_line("filter island").unwrap();
    assert!(shell.session().is_filtering());
    assert_eq!(shell.session().selected_category(), None);
    assert_eq!(shell.session().visible_entries().len(), 2);

    shell.execute_line("select 1").unwrap();
    shell.execute_line("edit layer 3").unwrap();
    assert_eq!(shell.session().selected_entry().unwrap().layer, 3);

    shell.execute_line("filter").unwrap();
    assert!(!shell.session().is_filtering());
    assert_eq!(
        shell.session().current_category().map(|c| c.name.as_str()),
        Some("Sea")
    );
    assert!(output.text().contains("Search: \"island\""));
}

#[test]
fn remove_entry_selects_the_neighbour() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.dat");
    write_sample(&path);

    let (mut shell, _output) = shell_with_script("");
    shell.execute_line(&format!("open {}", path.display())).unwrap();
    shell.execute_line("select 1").unwrap();
    shell.execute_line("remove-entry").unwrap();

    let selected = shell.session().selected_entry().unwrap();
    assert_eq!(selected.display_name, "Outset Island");
    assert!(shell.session().is_modified());
}

#[test]
fn category_commands() {
    let (mut shell, output) = shell_with_script("");
    shell.execute_line("new").unwrap();
    shell.execute_line("add-category").unwrap();
    shell.execute_line("rename-category Great Sea").unwrap();
    shell.execute_line("add-category Caves").unwrap();
    shell.execute_line("select-category 0").unwrap();
    assert_eq!(
        shell.session().current_category().map(|c| c.name.as_str()),
        Some("Great Sea")
    );

    shell.execute_line("remove-category").unwrap();
    assert_eq!(
        shell.session().current_category().map(|c| c.name.as_str()),
        Some("Caves")
    );
    shell.execute_line("select-category none").unwrap();
    assert_eq!(shell.session().selected_category(), None);
    assert!(output.text().contains("Added category 1."));
}
