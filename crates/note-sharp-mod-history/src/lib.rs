/// Linear undo/redo history of whole-document text snapshots.
///
/// Provides a `TextHistory` that records one snapshot per edit and moves a
/// cursor back and forth through them. Recording while the cursor sits in the
/// middle of the log discards the snapshots after it.
pub mod config;
pub mod text_history;

pub use config::HistoryConfig;
pub use text_history::TextHistory;
