//! Document session, file encoding, and status-bar model for note-sharp.

pub mod document;
pub mod encoding;
pub mod status;

pub use document::Document;
pub use encoding::TextEncoding;
pub use note_sharp_mod_history::{HistoryConfig, TextHistory};
pub use status::{CursorPosition, StatusLine, ZoomLevel};
