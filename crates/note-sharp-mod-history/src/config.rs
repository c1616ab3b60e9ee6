/// Configuration for the history system.
use note_sharp_config::AppConfig;

/// Configuration for a `TextHistory`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Max snapshots kept in the log. `None` keeps every snapshot.
    ///
    /// When exceeded, the oldest snapshot becomes the new origin text.
    pub max_history_depth: Option<usize>,
}

impl HistoryConfig {
    /// Returns a config capped at `depth` snapshots (at least one).
    pub fn bounded(depth: usize) -> Self {
        Self {
            max_history_depth: Some(depth.max(1)),
        }
    }
}

impl From<&AppConfig> for HistoryConfig {
    fn from(config: &AppConfig) -> Self {
        match config.max_history_depth {
            Some(depth) => Self::bounded(depth),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(HistoryConfig::default().max_history_depth, None);
    }

    #[test]
    fn test_bounded_floors_at_one() {
        assert_eq!(HistoryConfig::bounded(0).max_history_depth, Some(1));
        assert_eq!(HistoryConfig::bounded(7).max_history_depth, Some(7));
    }

    #[test]
    fn test_from_app_config() {
        let mut app = AppConfig::default();
        assert_eq!(HistoryConfig::from(&app), HistoryConfig::default());

        app.max_history_depth = Some(32);
        assert_eq!(HistoryConfig::from(&app).max_history_depth, Some(32));
    }
}
