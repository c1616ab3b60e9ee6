//! Document model combining text, caret, undo/redo history, and metadata.
//!
//! User edits go through [`Document::edit`] and the typing helpers, which
//! record a history snapshot. Undo/redo replace the text without recording,
//! so restored text never re-enters the history as a new edit. File I/O is
//! in the `io` submodule.

mod io;

use std::path::PathBuf;

use note_sharp_config::AppConfig;
use note_sharp_mod_history::{HistoryConfig, TextHistory};

use crate::encoding::TextEncoding;
use crate::status::{CursorPosition, StatusLine, ZoomLevel};

/// Title shown for documents that have never been saved.
pub const UNTITLED: &str = "Untitled";

/// A single open document with its text, history, and metadata.
pub struct Document {
    /// Current document text.
    text: String,
    /// Undo/redo history of whole-text snapshots.
    history: TextHistory,
    /// Caret as a char index into `text`.
    caret: usize,
    /// File path on disk, if any.
    pub file_path: Option<PathBuf>,
    /// The encoding used when saving.
    pub encoding: TextEncoding,
    /// Whether the document has been modified since it was last opened or saved.
    pub modified: bool,
    /// Display name (file name or "Untitled").
    pub title: String,
    /// Editor zoom factor.
    pub zoom: ZoomLevel,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("history", &self.history)
            .field("caret", &self.caret)
            .field("file_path", &self.file_path)
            .field("encoding", &self.encoding)
            .field("modified", &self.modified)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Document {
    /// Creates a new empty document whose history starts from empty text.
    pub fn new(config: &AppConfig) -> Self {
        let mut history = TextHistory::new(HistoryConfig::from(config));
        history.reset("");
        Self {
            text: String::new(),
            history,
            caret: 0,
            file_path: None,
            encoding: TextEncoding::default(),
            modified: false,
            title: UNTITLED.to_string(),
            zoom: ZoomLevel::from(config),
        }
    }

    /// Clears the document and its history, keeping zoom and config.
    pub fn new_document(&mut self) {
        self.text.clear();
        self.history.reset("");
        self.caret = 0;
        self.file_path = None;
        self.encoding = TextEncoding::default();
        self.modified = false;
        self.title = UNTITLED.to_string();
        tracing::debug!("Started new document");
    }

    /// The current document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &TextHistory {
        &self.history
    }

    /// Caret position as a char index.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Moves the caret, clamped to the end of the text.
    pub fn set_caret(&mut self, char_idx: usize) {
        self.caret = char_idx.min(self.len_chars());
    }

    /// Number of chars in the text.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Applies a user edit that replaced the whole text, recording a snapshot.
    ///
    /// The caret moves to the end of the new text.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.history.append(self.text.clone());
        self.caret = self.len_chars();
        self.modified = true;
    }

    /// Types a single character at the caret, recording one snapshot.
    pub fn type_char(&mut self, ch: char) {
        let byte_idx = self.byte_index(self.caret);
        self.text.insert(byte_idx, ch);
        self.history.append(self.text.clone());
        self.caret += 1;
        self.modified = true;
    }

    /// Types `s` one character at a time, like a run of keystrokes.
    pub fn type_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.type_char(ch);
        }
    }

    /// Steps back one snapshot. Returns whether the history moved.
    ///
    /// At the bottom of the history the origin text is restored again.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.can_undo();
        let restored = self.history.undo().to_string();
        self.replace_text(restored);
        moved
    }

    /// Steps forward one snapshot. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(restored) = self.history.redo().map(str::to_string) else {
            return false;
        };
        self.replace_text(restored);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Snapshot of what the status bar shows.
    pub fn status(&self) -> StatusLine {
        StatusLine {
            position: CursorPosition::from_char_index(&self.text, self.caret),
            zoom: self.zoom,
            encoding: self.encoding,
        }
    }

    /// Programmatic text replacement. Does not touch the history.
    fn replace_text(&mut self, text: String) {
        if text != self.text {
            self.modified = true;
        }
        self.text = text;
        self.caret = self.caret.min(self.len_chars());
    }

    /// Replaces text and history together, as when a file is loaded.
    fn reset_text(&mut self, text: String) {
        self.history.reset(text.as_str());
        self.text = text;
        self.caret = 0;
        self.modified = false;
    }

    /// Converts a char index to a byte index into `text`.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
