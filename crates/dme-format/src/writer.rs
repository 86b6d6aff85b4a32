//! Menu file writer.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use dme_model::{Category, Document, Entry};

use crate::error::{FormatError, Result};
use crate::header::{MAX_PREFIXED_LEN, build_header};

/// Menu file writer.
///
/// The document is fully encoded in memory before the first byte reaches
/// the underlying writer, so an encode error never leaves partial output.
pub struct MenuWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> MenuWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Encode and write a complete document.
    pub fn write_document(mut self, document: &Document) -> Result<()> {
        let bytes = encode(document)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a document to `path`.
///
/// Uses an atomic write (temp file + rename) so an interrupted save never
/// corrupts an existing file.
pub fn write_menu(path: &Path, document: &Document) -> Result<()> {
    let bytes = encode(document)?;
    write_atomic(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        "saved menu file"
    );
    Ok(())
}

/// Replace the file at `path` with `bytes`.
///
/// The bytes go to `<path>.tmp` first, are synced, and the temp file is then
/// renamed over the target. Parent directories are created as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| FormatError::io("create directory", parent, e))?;
    }

    let mut file =
        File::create(&temp_path).map_err(|e| FormatError::io("create", &temp_path, e))?;
    file.write_all(bytes)
        .map_err(|e| FormatError::io("write", &temp_path, e))?;
    file.sync_all()
        .map_err(|e| FormatError::io("sync", &temp_path, e))?;
    drop(file);

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(FormatError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Encode a document into a complete file image.
///
/// Format (all integers big-endian):
/// - 4 bytes: magic (`"DMNU"`)
/// - 2 bytes: version
/// - 2 bytes: category count, then per category its name and entries
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(64 + document.entry_count() * 32);
    out.extend_from_slice(&build_header());

    write_count(&mut out, document.category_count(), "categories")?;
    for category in document.categories() {
        write_category(&mut out, category)?;
    }
    Ok(out)
}

fn write_category(out: &mut Vec<u8>, category: &Category) -> Result<()> {
    write_string(out, &category.name, "category name")?;
    write_count(out, category.len(), "entries in a category")?;
    for entry in category.entries() {
        write_entry(out, entry)?;
    }
    Ok(())
}

fn write_entry(out: &mut Vec<u8>, entry: &Entry) -> Result<()> {
    write_string(out, &entry.display_name, "entry display name")?;
    write_string(out, &entry.map_name, "entry map name")?;
    out.extend_from_slice(&[entry.room, entry.spawn, entry.layer]);
    Ok(())
}

fn write_count(out: &mut Vec<u8>, count: usize, context: &'static str) -> Result<()> {
    let count = u16::try_from(count).map_err(|_| FormatError::TooMany {
        context,
        count,
        max: MAX_PREFIXED_LEN,
    })?;
    out.extend_from_slice(&count.to_be_bytes());
    Ok(())
}

fn write_string(out: &mut Vec<u8>, value: &str, context: &'static str) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| FormatError::TooLong {
        context,
        len: value.len(),
        max: MAX_PREFIXED_LEN,
    })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

/// `Menu1.dat` -> `Menu1.dat.tmp`, next to the target.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
