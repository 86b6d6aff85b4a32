//! Terminal tables for documents, categories and entries.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dme_model::{CategoryId, Document, Entry, EntryId};

/// One search result: the entry plus the name of the category holding it.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub category: &'a str,
    pub entry: &'a Entry,
}

/// Every entry of every category.
pub fn document_table(document: &Document) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("#"),
        header_cell("Display name"),
        header_cell("Map"),
        header_cell("Room"),
        header_cell("Spawn"),
        header_cell("Layer"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_numeric_columns(&mut table, 4);

    for category in document.categories() {
        if category.is_empty() {
            table.add_row(vec![
                Cell::new(&category.name).add_attribute(Attribute::Bold),
                Cell::new("-"),
                Cell::new("(no entries)").fg(Color::DarkGrey),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ]);
            continue;
        }
        for (index, entry) in category.entries().iter().enumerate() {
            let category_cell = if index == 0 {
                Cell::new(&category.name).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            let mut row = vec![category_cell, Cell::new(index)];
            row.extend(entry_cells(entry));
            table.add_row(row);
        }
    }
    table
}

/// Categories of a document, marking the selected one.
pub fn categories_table(document: &Document, selected: Option<CategoryId>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell(""),
        header_cell("Name"),
        header_cell("Entries"),
    ]);
    apply_compact_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for (index, category) in document.categories().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            marker_cell(Some(category.id()) == selected),
            Cell::new(&category.name),
            Cell::new(category.len()),
        ]);
    }
    table
}

/// The visible entry list, marking selected entries.
pub fn entries_table(entries: &[&Entry], selected: &[EntryId]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell(""),
        header_cell("Display name"),
        header_cell("Map"),
        header_cell("Room"),
        header_cell("Spawn"),
        header_cell("Layer"),
    ]);
    apply_compact_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_numeric_columns(&mut table, 4);

    for (index, entry) in entries.iter().enumerate() {
        let mut row = vec![Cell::new(index), marker_cell(selected.contains(&entry.id()))];
        row.extend(entry_cells(entry));
        table.add_row(row);
    }
    table
}

/// Search results with the owning category.
pub fn hits_table(hits: &[Hit<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Display name"),
        header_cell("Map"),
        header_cell("Room"),
        header_cell("Spawn"),
        header_cell("Layer"),
    ]);
    apply_table_style(&mut table);
    align_numeric_columns(&mut table, 3);

    for hit in hits {
        let mut row = vec![Cell::new(hit.category)];
        row.extend(entry_cells(hit.entry));
        table.add_row(row);
    }
    table
}

fn entry_cells(entry: &Entry) -> [Cell; 5] {
    [
        text_cell(&entry.display_name),
        text_cell(&entry.map_name),
        Cell::new(entry.room),
        Cell::new(entry.spawn),
        Cell::new(entry.layer),
    ]
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        Cell::new("(empty)").fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}

fn marker_cell(selected: bool) -> Cell {
    if selected {
        Cell::new("*").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_compact_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Right-align room, spawn and layer, the three columns starting at `first`.
fn align_numeric_columns(table: &mut Table, first: usize) {
    for column in first..first + 3 {
        align_column(table, column, CellAlignment::Right);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
