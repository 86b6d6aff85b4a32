//! New, open, save, save as, close and quit.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use dme_format::FormatError;
use dme_model::Document;

use super::{Outcome, Session};
use crate::boundary::SaveDecision;
use crate::config::ConfirmPolicy;
use crate::error::{Result, SessionError};
use crate::status;

impl Session {
    /// Replace the loaded document with an empty one.
    pub fn new_document(&mut self) -> Result<Outcome> {
        self.ensure_running()?;
        if self.confirm_save().is_cancelled() {
            return Ok(Outcome::Cancelled);
        }

        let document = Document::new();
        let name = document.display_name().to_string();
        self.install_document(Some(document));
        self.set_status(status::created(&name));
        tracing::info!(name = %name, "created new document");
        Ok(Outcome::Completed)
    }

    /// Ask the file picker for a file and open it.
    pub fn open(&mut self) -> Result<Outcome> {
        self.ensure_running()?;
        let Some(path) = self.picker.pick_open() else {
            tracing::debug!("open cancelled at file picker");
            return Ok(Outcome::Cancelled);
        };
        self.open_path(&path)
    }

    /// Open the menu file at `path`.
    ///
    /// On a decode failure the previously loaded document stays loaded, the
    /// status line reports the error and the error is returned.
    pub fn open_path(&mut self, path: &Path) -> Result<Outcome> {
        self.ensure_running()?;
        let file_name = file_name_of(path)?;
        if self.confirm_save().is_cancelled() {
            return Ok(Outcome::Cancelled);
        }

        self.set_status(status::loading(&file_name));
        let mut document = match self.load(path) {
            Ok(document) => document,
            Err(source) => {
                tracing::warn!(path = %path.display(), error = %source, "failed to load menu file");
                self.set_status(status::load_failed(&source));
                return Err(SessionError::Load {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        document
            .set_path(path)
            .map_err(|_| SessionError::InvalidPath(path.to_path_buf()))?;

        tracing::info!(
            path = %path.display(),
            categories = document.category_count(),
            entries = document.entry_count(),
            "opened document"
        );
        self.install_document(Some(document));
        self.set_status(status::loaded(&file_name));
        Ok(Outcome::Completed)
    }

    /// Unload the current document. Does nothing when none is loaded.
    pub fn close(&mut self) -> Result<Outcome> {
        self.ensure_running()?;
        let Some(document) = &self.document else {
            return Ok(Outcome::Completed);
        };
        let name = document.display_name().to_string();
        if self.confirm_save().is_cancelled() {
            return Ok(Outcome::Cancelled);
        }

        self.install_document(None);
        self.set_status(status::unloaded(&name));
        tracing::info!(name = %name, "closed document");
        Ok(Outcome::Completed)
    }

    /// Save to the document's known path, or fall back to [`Session::save_as`].
    pub fn save(&mut self) -> Result<Outcome> {
        self.ensure_running()?;
        match self.require_document()?.path() {
            Some(path) => {
                self.write_to(&path)?;
                Ok(Outcome::Completed)
            }
            None => self.save_as(),
        }
    }

    /// Ask the file picker for a destination and save there.
    pub fn save_as(&mut self) -> Result<Outcome> {
        self.ensure_running()?;
        let suggested = self.require_document()?.display_name().to_string();
        let Some(path) = self.picker.pick_save(&suggested) else {
            tracing::debug!("save cancelled at file picker");
            return Ok(Outcome::Cancelled);
        };
        self.save_as_path(&path)
    }

    /// Save to `path` and adopt it as the document's location.
    ///
    /// The configured default extension is appended when `path` has none.
    pub fn save_as_path(&mut self, path: &Path) -> Result<Outcome> {
        self.ensure_running()?;
        self.require_document()?;
        let path = self.with_default_extension(path);
        self.write_to(&path)?;
        Ok(Outcome::Completed)
    }

    /// Confirm-save the current document without ending the session.
    ///
    /// Front-ends call this when their window is about to close.
    pub fn window_closing(&mut self) -> Result<Outcome> {
        self.ensure_running()?;
        Ok(self.confirm_save())
    }

    /// Confirm-save the current document, then end the session.
    ///
    /// Every later operation fails with [`SessionError::Terminated`].
    pub fn quit(&mut self) -> Result<Outcome> {
        if self.terminated {
            return Ok(Outcome::Completed);
        }
        if self.confirm_save().is_cancelled() {
            return Ok(Outcome::Cancelled);
        }
        self.terminated = true;
        tracing::info!("session terminated");
        Ok(Outcome::Completed)
    }

    /// Offer to save the loaded document before it is replaced.
    ///
    /// `Cancelled` means the caller must stop without changing anything. Once
    /// the user chose to save, a failed save or a cancelled Save As picker
    /// only skips the save; the status line carries the failure and the
    /// caller proceeds.
    fn confirm_save(&mut self) -> Outcome {
        let Some(document) = &self.document else {
            return Outcome::Completed;
        };
        if self.config.confirm == ConfirmPolicy::WhenModified && !self.dirty.is_dirty() {
            return Outcome::Completed;
        }

        let name = document.display_name().to_string();
        let decision = self.confirmer.confirm_save(&name);
        tracing::debug!(document = %name, ?decision, "confirm save");
        match decision {
            SaveDecision::Save => {
                match self.save() {
                    Ok(Outcome::Completed) => {}
                    Ok(Outcome::Cancelled) => {
                        tracing::debug!(document = %name, "save skipped, continuing");
                    }
                    Err(error) => {
                        tracing::warn!(document = %name, %error, "save failed, continuing");
                    }
                }
                Outcome::Completed
            }
            SaveDecision::DontSave => Outcome::Completed,
            SaveDecision::Cancel => Outcome::Cancelled,
        }
    }

    fn load(&self, path: &Path) -> std::result::Result<Document, FormatError> {
        let file = File::open(path).map_err(|e| FormatError::io("open", path, e))?;
        self.codec.decode(&mut BufReader::new(file))
    }

    /// Encode the loaded document and atomically replace the file at `path`.
    ///
    /// The document only adopts `path` once the bytes are on disk.
    fn write_to(&mut self, path: &Path) -> Result<()> {
        let file_name = file_name_of(path)?;
        self.set_status(status::saving(&file_name));

        let written = {
            let document = self.require_document()?;
            let mut bytes = Vec::new();
            self.codec
                .encode(document, &mut bytes)
                .and_then(|()| dme_format::write_atomic(path, &bytes))
                .map(|()| bytes.len())
        };
        let bytes = match written {
            Ok(bytes) => bytes,
            Err(source) => {
                tracing::warn!(path = %path.display(), error = %source, "failed to save menu file");
                self.set_status(status::save_failed(&source));
                return Err(SessionError::Save {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        self.require_document_mut()?
            .set_path(path)
            .map_err(|_| SessionError::InvalidPath(path.to_path_buf()))?;
        self.dirty.mark_clean();
        self.refresh_title();
        self.set_status(status::saved(&file_name));
        tracing::info!(path = %path.display(), bytes, "saved document");
        Ok(())
    }

    fn with_default_extension(&self, path: &Path) -> PathBuf {
        let extension = self.config.default_extension.trim_start_matches('.');
        if path.extension().is_none() && !extension.is_empty() {
            path.with_extension(extension)
        } else {
            path.to_path_buf()
        }
    }
}

/// The final path component as text, used in status messages.
fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| SessionError::InvalidPath(path.to_path_buf()))
}
