//! Interactive line-oriented editor.
//!
//! The shell drives a [`Session`] from typed commands. The session's file
//! picker and save confirmation prompt on the same console the commands are
//! read from, so a scripted input stream can answer them too.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow, bail};
use dme_model::{Document, Entry};
use dme_session::{Confirmer, FilePicker, Outcome, SaveDecision, Session};

use crate::render;
use crate::settings::Settings;

/// Where the shell reads commands and writes output.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Console {
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }
}

type SharedConsole = Rc<RefCell<Console>>;

/// File picker that asks for a path on the console. An empty answer cancels.
pub struct ConsolePicker {
    console: SharedConsole,
}

impl ConsolePicker {
    fn ask(&self, prompt: &str) -> Option<PathBuf> {
        match self.console.borrow_mut().prompt(prompt) {
            Ok(Some(answer)) if !answer.trim().is_empty() => Some(PathBuf::from(answer.trim())),
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(%error, "console read failed, treating as cancel");
                None
            }
        }
    }
}

impl FilePicker for ConsolePicker {
    fn pick_open(&mut self) -> Option<PathBuf> {
        self.ask("Open file (empty to cancel): ")
    }

    fn pick_save(&mut self, suggested_name: &str) -> Option<PathBuf> {
        self.ask(&format!("Save {suggested_name} as (empty to cancel): "))
    }
}

/// Save confirmation on the console: `y`, `n`, anything else cancels.
pub struct ConsoleConfirmer {
    console: SharedConsole,
}

impl Confirmer for ConsoleConfirmer {
    fn confirm_save(&mut self, document_name: &str) -> SaveDecision {
        let prompt = format!("Save changes to {document_name}? [y]es/[n]o/[c]ancel: ");
        match self.console.borrow_mut().prompt(&prompt) {
            Ok(Some(answer)) => parse_decision(&answer),
            Ok(None) => SaveDecision::Cancel,
            Err(error) => {
                tracing::warn!(%error, "console read failed, treating as cancel");
                SaveDecision::Cancel
            }
        }
    }
}

fn parse_decision(answer: &str) -> SaveDecision {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => SaveDecision::Save,
        "n" | "no" => SaveDecision::DontSave,
        _ => SaveDecision::Cancel,
    }
}

/// Entry field addressed by `edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    DisplayName,
    MapName,
    Room,
    Spawn,
    Layer,
}

impl EntryField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" | "display" | "display-name" => Some(Self::DisplayName),
            "map" | "map-name" => Some(Self::MapName),
            "room" => Some(Self::Room),
            "spawn" => Some(Self::Spawn),
            "layer" => Some(Self::Layer),
            _ => None,
        }
    }

    /// Apply `value` to `entry`. Numeric fields must fit in a byte.
    fn apply(self, entry: &mut Entry, value: u8, text: &str) {
        match self {
            Self::DisplayName => entry.display_name = text.to_string(),
            Self::MapName => entry.map_name = text.to_string(),
            Self::Room => entry.room = value,
            Self::Spawn => entry.spawn = value,
            Self::Layer => entry.layer = value,
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Self::Room | Self::Spawn | Self::Layer)
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    New,
    Open(Option<PathBuf>),
    Save,
    SaveAs(Option<PathBuf>),
    Close,
    Quit,
    Categories,
    SelectCategory(Option<usize>),
    AddCategory(Option<String>),
    RenameCategory(String),
    RemoveCategory,
    Entries,
    Select(Vec<usize>),
    AddEntry,
    RemoveEntry,
    Edit { field: EntryField, value: String },
    Filter(String),
    Status,
    Help,
}

impl ShellCommand {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let optional_path = || (!rest.is_empty()).then(|| PathBuf::from(rest));

        let command = match name {
            "new" => Self::New,
            "open" => Self::Open(optional_path()),
            "save" => Self::Save,
            "save-as" => Self::SaveAs(optional_path()),
            "close" => Self::Close,
            "quit" | "exit" => Self::Quit,
            "categories" => Self::Categories,
            "select-category" => match rest {
                "" => bail!("usage: select-category <INDEX|none>"),
                "none" => Self::SelectCategory(None),
                index => Self::SelectCategory(Some(parse_index(index)?)),
            },
            "add-category" => Self::AddCategory((!rest.is_empty()).then(|| rest.to_string())),
            "rename-category" => {
                if rest.is_empty() {
                    bail!("usage: rename-category <NAME>");
                }
                Self::RenameCategory(rest.to_string())
            }
            "remove-category" => Self::RemoveCategory,
            "entries" => Self::Entries,
            "select" => Self::Select(
                rest.split_whitespace()
                    .map(parse_index)
                    .collect::<Result<_>>()?,
            ),
            "add-entry" => Self::AddEntry,
            "remove-entry" => Self::RemoveEntry,
            "edit" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                let field = EntryField::parse(field).ok_or_else(|| {
                    anyhow!("usage: edit <name|map|room|spawn|layer> <VALUE>")
                })?;
                Self::Edit {
                    field,
                    value: value.to_string(),
                }
            }
            "filter" => Self::Filter(rest.to_string()),
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            other => bail!("unknown command '{other}' (type 'help' for a list)"),
        };
        Ok(Some(command))
    }
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse()
        .with_context(|| format!("'{text}' is not a valid index"))
}

const HELP: &str = "\
Commands:
  new                       create an empty menu
  open [PATH]               open a menu file
  save                      save to the current file
  save-as [PATH]            save to a new file
  close                     close the current menu
  quit                      leave the editor
  categories                list categories
  select-category <N|none>  select a category by index
  add-category [NAME]       append a category and select it
  rename-category <NAME>    rename the selected category
  remove-category           remove the selected category
  entries                   list visible entries
  select <N>...             select visible entries by index
  add-entry                 append an entry to the selected category
  remove-entry              remove the selected entries
  edit <FIELD> <VALUE>      edit the selected entry (name, map, room, spawn, layer)
  filter [TEXT]             search all categories; no text clears the filter
  status                    show the status line
  help                      show this list";

/// The interactive editor.
pub struct Shell {
    session: Session,
    console: SharedConsole,
    settings: Settings,
    settings_path: Option<PathBuf>,
}

impl Shell {
    pub fn new(console: Console, settings: Settings) -> Self {
        let console = Rc::new(RefCell::new(console));
        let picker = ConsolePicker {
            console: Rc::clone(&console),
        };
        let confirmer = ConsoleConfirmer {
            console: Rc::clone(&console),
        };
        let session = Session::new(picker, confirmer).with_config(settings.session.clone());
        Self {
            session,
            console,
            settings,
            settings_path: None,
        }
    }

    /// Persist settings (recent files) to `path` after they change.
    #[must_use]
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.say(format!("{} (type 'help' for commands)", self.session.window_title()))?;
        while !self.session.is_terminated() {
            let Some(line) = self.console.borrow_mut().prompt("dme> ")? else {
                tracing::debug!("end of input");
                break;
            };
            if let Err(error) = self.execute_line(&line) {
                self.say(format!("error: {error:#}"))?;
            }
        }
        Ok(())
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> Result<()> {
        match ShellCommand::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<()> {
        tracing::debug!(?command, "executing shell command");
        match command {
            ShellCommand::New => {
                let outcome = self.session.new_document()?;
                self.report(outcome)?;
            }
            ShellCommand::Open(path) => {
                let outcome = match path {
                    Some(path) => self.session.open_path(&path),
                    None => self.session.open(),
                };
                self.after_file_operation(outcome)?;
            }
            ShellCommand::Save => {
                let outcome = self.session.save();
                self.after_file_operation(outcome)?;
            }
            ShellCommand::SaveAs(path) => {
                let outcome = match path {
                    Some(path) => self.session.save_as_path(&path),
                    None => self.session.save_as(),
                };
                self.after_file_operation(outcome)?;
            }
            ShellCommand::Close => {
                let outcome = self.session.close()?;
                self.report(outcome)?;
            }
            ShellCommand::Quit => {
                if self.session.quit()?.is_cancelled() {
                    self.say("Quit cancelled.")?;
                }
            }
            ShellCommand::Categories => self.print_categories()?,
            ShellCommand::SelectCategory(index) => {
                match index {
                    Some(index) => {
                        self.session.select_category_at(index)?;
                    }
                    None => self.session.select_category(None)?,
                }
                self.print_entries()?;
            }
            ShellCommand::AddCategory(name) => {
                let id = match name {
                    Some(name) => self.session.add_category_named(name)?,
                    None => self.session.add_category()?,
                };
                let index = self
                    .session
                    .document()
                    .and_then(|doc| doc.category_index(id))
                    .unwrap_or_default();
                self.say(format!("Added category {index}."))?;
            }
            ShellCommand::RenameCategory(name) => {
                self.session.rename_selected_category(name)?;
                self.print_categories()?;
            }
            ShellCommand::RemoveCategory => {
                self.session.remove_category()?;
                self.print_categories()?;
            }
            ShellCommand::Entries => self.print_entries()?,
            ShellCommand::Select(indices) => {
                let visible: Vec<_> = self
                    .session
                    .visible_entries()
                    .iter()
                    .map(|entry| entry.id())
                    .collect();
                let ids = indices
                    .iter()
                    .map(|&i| {
                        visible.get(i).copied().ok_or_else(|| {
                            anyhow!("no visible entry {i} (there are {})", visible.len())
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.session.select_entries(&ids)?;
                self.print_entries()?;
            }
            ShellCommand::AddEntry => {
                self.session.add_entry()?;
                self.print_entries()?;
            }
            ShellCommand::RemoveEntry => {
                let removed = self.session.remove_entry()?;
                self.say(format!("Removed {removed} entries."))?;
                self.print_entries()?;
            }
            ShellCommand::Edit { field, value } => {
                let number = if field.is_numeric() {
                    value
                        .parse::<u8>()
                        .with_context(|| format!("'{value}' is not a number from 0 to 255"))?
                } else {
                    0
                };
                self.session
                    .update_selected_entry(|entry| field.apply(entry, number, &value))?;
                self.print_entries()?;
            }
            ShellCommand::Filter(text) => {
                self.session.set_search_filter(text)?;
                self.print_entries()?;
            }
            ShellCommand::Status => self.print_status()?,
            ShellCommand::Help => self.say(HELP)?,
        }
        Ok(())
    }

    /// Print the status line, remember the file on success, and surface
    /// load/save errors.
    fn after_file_operation(&mut self, outcome: dme_session::Result<Outcome>) -> Result<()> {
        match outcome {
            Ok(Outcome::Completed) => {
                self.say(self.session.status().to_string())?;
                self.remember_current_file();
                Ok(())
            }
            Ok(Outcome::Cancelled) => self.say("Cancelled."),
            Err(error) => {
                let mut message = error.user_message();
                if let Some(suggestion) = error.suggestion() {
                    message.push_str(&format!("\n  hint: {suggestion}"));
                }
                Err(anyhow!(message))
            }
        }
    }

    fn report(&mut self, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Completed => self.say(self.session.status().to_string()),
            Outcome::Cancelled => self.say("Cancelled."),
        }
    }

    fn remember_current_file(&mut self) {
        let Some(path) = self.session.document().and_then(Document::path) else {
            return;
        };
        self.settings.recent.add(path);
        if let Some(settings_path) = &self.settings_path
            && let Err(error) = self.settings.save_to(settings_path)
        {
            tracing::warn!(error = %format!("{error:#}"), "failed to save recent files");
        }
    }

    fn print_categories(&mut self) -> Result<()> {
        let table = match self.session.document() {
            Some(doc) => render::categories_table(doc, self.session.selected_category()),
            None => bail!(dme_session::SessionError::NoDocumentLoaded),
        };
        self.say(table)
    }

    fn print_entries(&mut self) -> Result<()> {
        let heading = match (self.session.current_category(), self.session.is_filtering()) {
            (Some(category), _) => format!("Category: {}", category.name),
            (None, true) => format!("Search: \"{}\"", self.session.search_filter()),
            (None, false) => "All entries".to_string(),
        };
        let table = render::entries_table(
            &self.session.visible_entries(),
            self.session.selected_entries(),
        );
        self.say(heading)?;
        self.say(table)
    }

    fn print_status(&mut self) -> Result<()> {
        let mut lines = vec![
            format!("Title:    {}", self.session.window_title()),
            format!("Status:   {}", self.session.status()),
            format!("Confirm:  {}", self.session.config().confirm.label()),
        ];
        if self.session.is_loaded() {
            lines.push(format!("Modified: {}", self.session.is_modified()));
            lines.push(format!(
                "Filter:   {}",
                if self.session.is_filtering() {
                    self.session.search_filter()
                } else {
                    "(none)"
                }
            ));
        }
        if !self.settings.recent.is_empty() {
            lines.push("Recent:".to_string());
            lines.extend(
                self.settings
                    .recent
                    .iter()
                    .map(|path| format!("  {}", path.display())),
            );
        }
        self.say(lines.join("\n"))
    }

    fn say(&self, text: impl Display) -> Result<()> {
        self.console
            .borrow_mut()
            .line(text)
            .context("failed to write to console")
    }
}
