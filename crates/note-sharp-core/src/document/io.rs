//! File I/O operations for documents.
//!
//! Loading a file replaces the text and resets the history to the loaded
//! content. Saving leaves the history untouched.

use std::path::Path;

use anyhow::{Context, Result};
use note_sharp_config::AppConfig;

use crate::encoding::{decode_bytes, detect_encoding, encode_string, TextEncoding};

use super::{Document, UNTITLED};

/// Reads and decodes a file, returning its text and detected encoding.
fn read_text(path: &Path) -> Result<(String, TextEncoding)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    let encoding = detect_encoding(&bytes);
    let text = decode_bytes(&bytes, encoding)
        .with_context(|| format!("failed to decode file: {}", path.display()))?;
    Ok((text, encoding))
}

fn title_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNTITLED.to_string())
}

impl Document {
    /// Opens a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn open(path: &Path, config: &AppConfig) -> Result<Self> {
        let mut doc = Self::new(config);
        doc.load(path)?;
        Ok(doc)
    }

    /// Replaces this document's content with a file from disk.
    ///
    /// The history is reset so the loaded text becomes the undo floor. On
    /// error the document is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let (text, encoding) = read_text(path)?;
        tracing::info!("Loaded {} ({encoding})", path.display());

        self.reset_text(text);
        self.encoding = encoding;
        self.file_path = Some(path.to_path_buf());
        self.title = title_for(path);
        Ok(())
    }

    /// Saves the document to its file path.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is set or the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .context("no file path set for this document")?;
        self.save_to(&path)
    }

    /// Saves the document to a specific path and adopts it as the file path.
    ///
    /// An ASCII document that gained non-ASCII text is saved as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be encoded or written.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        if self.encoding == TextEncoding::Ascii && !self.text.is_ascii() {
            self.encoding = TextEncoding::Utf8;
        }
        let bytes = encode_string(&self.text, self.encoding)
            .with_context(|| format!("failed to encode document as {}", self.encoding))?;

        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write file: {}", path.display()))?;
        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());

        self.file_path = Some(path.to_path_buf());
        self.title = title_for(path);
        self.modified = false;
        Ok(())
    }
}
