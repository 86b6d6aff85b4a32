//! One-shot commands: `show`, `search` and `new`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use dme_format::{read_menu, write_menu};
use dme_model::{Category, Document};
use dme_session::FilterOptions;
use dme_session::view::{ViewMode, visible_entries};

use crate::render::{self, Hit};

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowFormat {
    #[default]
    Table,
    Json,
}

/// Render a whole menu file.
pub fn show(path: &Path, format: ShowFormat) -> Result<String> {
    let document = load(path)?;
    let rendered = match format {
        ShowFormat::Table => {
            let mut out = format!(
                "{} ({} categories, {} entries)\n",
                document.display_name(),
                document.category_count(),
                document.entry_count()
            );
            out.push_str(&render::document_table(&document).to_string());
            out
        }
        ShowFormat::Json => {
            serde_json::to_string_pretty(&document).context("failed to serialize document")?
        }
    };
    Ok(rendered)
}

/// Find entries whose display or map name contains `text`, across all
/// categories, and render them as a table.
pub fn search(path: &Path, text: &str, options: FilterOptions) -> Result<(usize, String)> {
    let document = load(path)?;
    let hits = find(&document, text, options);
    tracing::debug!(path = %path.display(), text, hits = hits.len(), "searched menu file");
    if hits.is_empty() {
        return Ok((0, format!("No entries match \"{text}\".")));
    }
    Ok((hits.len(), render::hits_table(&hits).to_string()))
}

/// Entries matching `text` paired with their category name.
pub fn find<'a>(document: &'a Document, text: &str, options: FilterOptions) -> Vec<Hit<'a>> {
    let mode = ViewMode::Search {
        filter: text.to_string(),
        resume: None,
    };
    visible_entries(document, &mode, options)
        .into_iter()
        .filter_map(|entry| {
            let (category, _) = document.find_entry(entry.id())?;
            let category = document.category(category)?;
            Some(Hit {
                category: &category.name,
                entry,
            })
        })
        .collect()
}

/// Create a new menu file holding empty categories named `categories`.
///
/// Refuses to overwrite an existing file.
pub fn create(path: &Path, categories: &[String]) -> Result<Document> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let mut document = Document::from_categories(categories.iter().map(Category::new));
    write_menu(path, &document)
        .with_context(|| format!("failed to write {}", path.display()))?;
    document
        .set_path(path)
        .with_context(|| format!("invalid path {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        categories = document.category_count(),
        "created menu file"
    );
    Ok(document)
}

fn load(path: &Path) -> Result<Document> {
    read_menu(path).map_err(|error| {
        let mut message = format!("cannot read {}: {}", path.display(), error.user_message());
        if let Some(suggestion) = error.suggestion() {
            message.push_str(&format!("\n  hint: {suggestion}"));
        }
        anyhow::anyhow!(message)
    })
}
