/// Snapshot-based undo/redo history for a single document.
///
/// Every recorded edit stores the complete document text. A cursor points one
/// past the active snapshot; index 0 means the origin text (the state at the
/// last reset) is active.
use crate::config::HistoryConfig;

/// Linear undo/redo history of whole-document snapshots.
///
/// Each open document owns one `TextHistory`. Recording a snapshot while
/// positioned before the end of the log discards the redo branch; there is
/// no tree of alternative branches.
#[derive(Clone)]
pub struct TextHistory {
    /// Recorded snapshots, oldest first.
    log: Vec<String>,
    /// One past the active snapshot. Always `<= log.len()`.
    index: usize,
    /// Text active when `index == 0`.
    origin: String,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl std::fmt::Debug for TextHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextHistory")
            .field("len", &self.log.len())
            .field("index", &self.index)
            .field("origin_len", &self.origin.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for TextHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl TextHistory {
    /// Creates an empty history whose origin text is the empty string.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            log: Vec::new(),
            index: 0,
            origin: String::new(),
            config,
        }
    }

    /// Creates an unbounded history starting from `base_text`.
    pub fn with_origin(base_text: impl Into<String>) -> Self {
        let mut history = Self::default();
        history.reset(base_text);
        history
    }

    /// Discards all snapshots and makes `base_text` the new origin.
    ///
    /// Used for "new document" and "load file". Irreversible.
    pub fn reset(&mut self, base_text: impl Into<String>) {
        if !self.log.is_empty() {
            tracing::debug!("Resetting history, dropping {} snapshots", self.log.len());
        }
        self.log.clear();
        self.index = 0;
        self.origin = base_text.into();
    }

    /// Records a snapshot of the whole document after an edit.
    ///
    /// Any snapshots after the cursor are discarded first. The new snapshot
    /// becomes the active one. Any text is accepted, including text equal to
    /// the previous snapshot.
    pub fn append(&mut self, text: impl Into<String>) {
        if self.index < self.log.len() {
            tracing::debug!(
                "Discarding {} redo snapshots",
                self.log.len() - self.index
            );
            self.log.truncate(self.index);
        }
        self.log.push(text.into());
        self.index += 1;
        self.enforce_depth();
    }

    /// Whether there is a snapshot after the cursor to redo into.
    pub fn can_redo(&self) -> bool {
        self.index < self.log.len()
    }

    /// Whether undo would move the cursor.
    ///
    /// `undo()` is still safe to call when this is false; it returns the
    /// origin text.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Steps back one snapshot and returns the text that is now active.
    ///
    /// At the bottom of the log this returns the origin text and leaves the
    /// cursor where it is, so repeated calls are idempotent.
    pub fn undo(&mut self) -> &str {
        if self.index > 0 {
            self.index -= 1;
        }
        self.current()
    }

    /// Steps forward one snapshot and returns the text that is now active.
    ///
    /// Returns `None` without changing anything if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// The active snapshot, or the origin text at index 0.
    pub fn current(&self) -> &str {
        self.index
            .checked_sub(1)
            .and_then(|i| self.log.get(i))
            .map_or(self.origin.as_str(), String::as_str)
    }

    /// The text restored when undoing past the first snapshot.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// One past the active snapshot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of recorded snapshots, including the redo branch.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether no snapshot has been recorded since the last reset.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// All recorded snapshots, oldest first.
    pub fn snapshots(&self) -> &[String] {
        &self.log
    }

    /// Settings this history was created with.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Evicts the oldest snapshots beyond `max_history_depth`.
    ///
    /// The newest evicted snapshot becomes the origin so undo still bottoms
    /// out at the oldest state that can be reconstructed.
    fn enforce_depth(&mut self) {
        let Some(max) = self.config.max_history_depth else {
            return;
        };
        let max = max.max(1);
        if self.log.len() <= max {
            return;
        }

        let excess = self.log.len() - max;
        if let Some(new_origin) = self.log.drain(..excess).last() {
            self.origin = new_origin;
        }
        self.index = self.index.saturating_sub(excess);
        tracing::debug!("Evicted {excess} snapshots past max depth {max}");
    }
}
