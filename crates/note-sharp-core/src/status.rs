//! Status bar model: caret position, zoom factor, and encoding label.

use note_sharp_config::AppConfig;

use crate::encoding::TextEncoding;

/// A 0-indexed line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// 0-indexed line number.
    pub line: usize,
    /// 0-indexed column (char offset within line).
    pub col: usize,
}

impl CursorPosition {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Computes the position of a char index in `text`.
    ///
    /// Indexes past the end are clamped to the end of the text. A `\r` does
    /// not advance the column, so CRLF and LF text report the same columns.
    pub fn from_char_index(text: &str, char_idx: usize) -> Self {
        text.chars()
            .take(char_idx)
            .fold(Self::default(), |pos, ch| match ch {
                '\n' => Self::new(pos.line + 1, 0),
                '\r' => pos,
                _ => Self::new(pos.line, pos.col + 1),
            })
    }
}

impl std::fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ln {}, Col {}", self.line + 1, self.col + 1)
    }
}

/// Editor zoom factor, stepped in fixed increments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel {
    factor: f32,
    step: f32,
    max: f32,
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ZoomLevel {
    fn from(config: &AppConfig) -> Self {
        let step = config.zoom_step.max(0.1);
        let max = config.max_zoom_level.max(1.0).max(step);
        Self {
            factor: config.current_zoom_level.clamp(step, max),
            step,
            max,
        }
    }
}

impl ZoomLevel {
    /// Current scale, where 1.0 is 100%.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Increases the zoom by one step, up to the maximum.
    pub fn zoom_in(&mut self) {
        self.factor = (self.factor + self.step).min(self.max);
    }

    /// Decreases the zoom by one step, never below one step.
    pub fn zoom_out(&mut self) {
        self.factor = (self.factor - self.step).max(self.step);
    }

    /// Zoom as a whole percentage.
    pub fn percent(&self) -> u32 {
        (self.factor * 100.0).round() as u32
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Everything shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine {
    pub position: CursorPosition,
    pub zoom: ZoomLevel,
    pub encoding: TextEncoding,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {}", self.position, self.zoom, self.encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_start() {
        assert_eq!(CursorPosition::from_char_index("abc", 0), CursorPosition::new(0, 0));
        assert_eq!(CursorPosition::from_char_index("", 0), CursorPosition::new(0, 0));
    }

    #[test]
    fn test_position_multiline() {
        let text = "hello\nworld\nfoo";
        assert_eq!(CursorPosition::from_char_index(text, 5), CursorPosition::new(0, 5));
        assert_eq!(CursorPosition::from_char_index(text, 6), CursorPosition::new(1, 0));
        assert_eq!(CursorPosition::from_char_index(text, 14), CursorPosition::new(2, 2));
    }

    #[test]
    fn test_position_clamps_past_end() {
        assert_eq!(CursorPosition::from_char_index("ab\nc", 99), CursorPosition::new(1, 1));
    }

    #[test]
    fn test_position_counts_chars_not_bytes() {
        assert_eq!(CursorPosition::from_char_index("日本語", 2), CursorPosition::new(0, 2));
    }

    #[test]
    fn test_position_ignores_carriage_return() {
        assert_eq!(CursorPosition::from_char_index("ab\r\ncd", 5), CursorPosition::new(1, 1));
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(CursorPosition::new(0, 0).to_string(), "Ln 1, Col 1");
        assert_eq!(CursorPosition::new(4, 9).to_string(), "Ln 5, Col 10");
    }

    #[test]
    fn test_zoom_default() {
        let zoom = ZoomLevel::default();
        assert_eq!(zoom.percent(), 100);
        assert_eq!(zoom.to_string(), "100%");
    }

    #[test]
    fn test_zoom_steps_by_half() {
        let mut zoom = ZoomLevel::default();
        zoom.zoom_in();
        assert_eq!(zoom.to_string(), "150%");
        zoom.zoom_out();
        zoom.zoom_out();
        assert_eq!(zoom.to_string(), "50%");
    }

    #[test]
    fn test_zoom_clamps() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..20 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.percent(), 50);
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.percent(), 500);
    }

    #[test]
    fn test_zoom_from_config() {
        let mut config = AppConfig::default();
        config.current_zoom_level = 2.0;
        config.zoom_step = 0.25;
        let mut zoom = ZoomLevel::from(&config);
        assert!((zoom.factor() - 2.0).abs() < f32::EPSILON);
        zoom.zoom_in();
        assert_eq!(zoom.percent(), 225);
    }

    #[test]
    fn test_zoom_from_unsanitized_config() {
        let mut config = AppConfig::default();
        config.zoom_step = 10.0;
        config.max_zoom_level = 5.0;
        let mut zoom = ZoomLevel::from(&config);
        assert_eq!(zoom.percent(), 1000);
        zoom.zoom_in();
        zoom.zoom_out();
        assert!((zoom.factor() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_status_line_display() {
        let status = StatusLine {
            position: CursorPosition::new(2, 3),
            zoom: ZoomLevel::default(),
            encoding: TextEncoding::Utf8,
        };
        assert_eq!(status.to_string(), "Ln 3, Col 4 | 100% | UTF-8");
    }
}
