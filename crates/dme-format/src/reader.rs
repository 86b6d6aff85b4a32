//! Menu file reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use dme_model::{Category, Document, Entry};

use crate::error::{FormatError, Result};
use crate::header::{HEADER_LEN, parse_header};

/// Menu file reader.
///
/// The whole stream is read into memory and parsed in one pass; a document
/// is only returned once every byte has been validated.
pub struct MenuReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> MenuReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read and parse the complete document.
    pub fn read_document(mut self) -> Result<Document> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        decode(&data)
    }
}

impl MenuReader<File> {
    /// Open a menu file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| FormatError::io("open", path, e))?;
        Ok(Self::new(file))
    }
}

/// Read a menu file from a path.
///
/// The returned document has its name and folder set from `path`.
pub fn read_menu(path: &Path) -> Result<Document> {
    let mut document = MenuReader::open(path)?.read_document()?;
    // Non-UTF-8 file names load fine but stay unnamed.
    if let Err(error) = document.set_path(path) {
        tracing::warn!(path = %path.display(), %error, "menu file name is not usable");
    }
    tracing::info!(
        path = %path.display(),
        categories = document.category_count(),
        entries = document.entry_count(),
        "loaded menu file"
    );
    Ok(document)
}

/// Parse a complete menu file image.
pub fn decode(data: &[u8]) -> Result<Document> {
    parse_header(data)?;
    let mut cursor = ByteCursor::new(data, HEADER_LEN);

    let category_count = cursor.read_u16("category count")?;
    let mut categories = Vec::with_capacity(usize::from(category_count));
    for _ in 0..category_count {
        categories.push(read_category(&mut cursor)?);
    }

    let remaining = cursor.remaining();
    if remaining > 0 {
        return Err(FormatError::TrailingBytes { count: remaining });
    }
    Ok(Document::from_categories(categories))
}

fn read_category(cursor: &mut ByteCursor<'_>) -> Result<Category> {
    let name = cursor.read_string("category name")?;
    let entry_count = cursor.read_u16("entry count")?;
    let mut entries = Vec::with_capacity(usize::from(entry_count));
    for _ in 0..entry_count {
        entries.push(read_entry(cursor)?);
    }
    Ok(Category::new(name).with_entries(entries))
}

fn read_entry(cursor: &mut ByteCursor<'_>) -> Result<Entry> {
    let display_name = cursor.read_string("entry display name")?;
    let map_name = cursor.read_string("entry map name")?;
    let room = cursor.read_u8("entry room")?;
    let spawn = cursor.read_u8("entry spawn")?;
    let layer = cursor.read_u8("entry layer")?;
    Ok(Entry::named(display_name, map_name).with_target(room, spawn, layer))
}

/// Big-endian cursor over an in-memory image.
struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn take(&mut self, len: usize, context: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(FormatError::Truncated { context });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn read_u8(&mut self, context: &'static str) -> Result<u8> {
        Ok(self.take(1, context)?[0])
    }

    fn read_u16(&mut self, context: &'static str) -> Result<u16> {
        let bytes = self.take(2, context)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_string(&mut self, context: &'static str) -> Result<String> {
        let len = self.read_u16(context)?;
        let bytes = self.take(usize::from(len), context)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidUtf8 { context })
    }
}
