/// Application configuration: load, save, and sanitize.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name of the configuration file.
const CONFIG_FILE_NAME: &str = "note-sharp.json";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub current_zoom_level: f32,
    pub max_zoom_level: f32,
    /// Amount added or removed by one zoom in/out step.
    pub zoom_step: f32,
    /// Maximum number of snapshots kept per document. `None` = unbounded.
    pub max_history_depth: Option<usize>,
    /// Whether to remember the last folder used for open/save.
    pub remember_last_folder: bool,
    /// Default folder for relative paths. Empty = current working directory.
    pub default_work_folder: String,
    /// Last folder used for an open/save (persisted across sessions).
    pub last_used_folder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_zoom_level: 1.0,
            max_zoom_level: 5.0,
            zoom_step: 0.5,
            max_history_depth: None,
            remember_last_folder: true,
            default_work_folder: String::new(),
            last_used_folder: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `note-sharp.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            return config;
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                serde_json::from_str::<AppConfig>(&contents).map_err(|e| e.to_string())
            });

        // A broken file is left alone so the user can fix it by hand.
        let mut config = parsed.unwrap_or_else(|e| {
            tracing::warn!("Failed to load config at {}: {e}", path.display());
            Self::default()
        });
        config.sanitize();
        config
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Returns the effective base directory for relative paths.
    ///
    /// Resolution order:
    /// 1. `last_used_folder` (if `remember_last_folder` is true and the path exists)
    /// 2. `default_work_folder` (if non-empty and the path exists)
    /// 3. `None` (relative paths stay relative to the working directory)
    pub fn resolve_work_folder(&self) -> Option<PathBuf> {
        if self.remember_last_folder && !self.last_used_folder.is_empty() {
            let p = PathBuf::from(&self.last_used_folder);
            if p.is_dir() {
                return Some(p);
            }
        }
        if !self.default_work_folder.is_empty() {
            let p = PathBuf::from(&self.default_work_folder);
            if p.is_dir() {
                return Some(p);
            }
        }
        None
    }

    /// Turns a user-typed path into the path to open or save.
    ///
    /// `~/` expands to the home directory; other relative paths are joined
    /// onto [`Self::resolve_work_folder`].
    pub fn expand_path(&self, raw: &str) -> PathBuf {
        if let Some(rest) = raw.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            return path;
        }
        match self.resolve_work_folder() {
            Some(base) => base.join(path),
            None => path,
        }
    }

    /// Records the folder containing `file` as the last used folder.
    ///
    /// No-op when `remember_last_folder` is disabled.
    pub fn remember_folder_of(&mut self, file: &std::path::Path) {
        if !self.remember_last_folder {
            return;
        }
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_used_folder = parent.to_string_lossy().into_owned();
        }
    }

    /// Clamps values to valid ranges. `max_zoom_level` never ends up below
    /// `zoom_step`.
    pub fn sanitize(&mut self) {
        self.zoom_step = self.zoom_step.max(0.1);
        self.max_zoom_level = self.max_zoom_level.max(1.0).max(self.zoom_step);
        self.current_zoom_level = self
            .current_zoom_level
            .clamp(self.zoom_step, self.max_zoom_level);
        self.max_history_depth = self.max_history_depth.map(|depth| depth.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!((config.current_zoom_level - 1.0).abs() < f32::EPSILON);
        assert!((config.zoom_step - 0.5).abs() < f32::EPSILON);
        assert!(config.max_history_depth.is_none());
        assert!(config.remember_last_folder);
    }

    #[test]
    fn test_sanitize_clamps_zoom() {
        let mut config = AppConfig::default();
        config.current_zoom_level = 4.0;
        config.sanitize();
        assert!((config.current_zoom_level - 4.0).abs() < f32::EPSILON);

        config.current_zoom_level = 0.1;
        config.sanitize();
        assert!((config.current_zoom_level - 0.5).abs() < f32::EPSILON);

        config.current_zoom_level = 50.0;
        config.sanitize();
        assert!((config.current_zoom_level - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_zoom_step_minimum() {
        let mut config = AppConfig::default();
        config.zoom_step = 0.0;
        config.sanitize();
        assert!((config.zoom_step - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_max_zoom_minimum() {
        let mut config = AppConfig::default();
        config.max_zoom_level = 0.2;
        config.sanitize();
        assert!((config.max_zoom_level - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_step_above_max_raises_max() {
        let mut config = AppConfig::default();
        config.zoom_step = 10.0;
        config.max_zoom_level = 5.0;
        config.current_zoom_level = 1.0;
        config.sanitize();
        assert!((config.max_zoom_level - 10.0).abs() < f32::EPSILON);
        assert!((config.current_zoom_level - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_history_depth_zero_becomes_one() {
        let mut config = AppConfig::default();
        config.max_history_depth = Some(0);
        config.sanitize();
        assert_eq!(config.max_history_depth, Some(1));
    }

    #[test]
    fn test_sanitize_keeps_unbounded_history() {
        let mut config = AppConfig::default();
        config.sanitize();
        assert_eq!(config.max_history_depth, None);
    }

    #[test]
    fn test_remember_folder_of() {
        let mut config = AppConfig::default();
        config.remember_folder_of(std::path::Path::new("/tmp/notes/todo.txt"));
        assert_eq!(
            PathBuf::from(&config.last_used_folder),
            PathBuf::from("/tmp/notes")
        );
    }

    #[test]
    fn test_remember_folder_disabled() {
        let mut config = AppConfig::default();
        config.remember_last_folder = false;
        config.remember_folder_of(std::path::Path::new("/tmp/notes/todo.txt"));
        assert!(config.last_used_folder.is_empty());
    }

    #[test]
    fn test_remember_folder_of_bare_file_name() {
        let mut config = AppConfig::default();
        config.remember_folder_of(std::path::Path::new("todo.txt"));
        assert!(config.last_used_folder.is_empty());
    }

    #[test]
    fn test_expand_path_relative_without_work_folder() {
        let config = AppConfig::default();
        assert_eq!(config.expand_path("notes.txt"), PathBuf::from("notes.txt"));
    }

    #[test]
    fn test_expand_path_absolute_untouched() {
        let mut config = AppConfig::default();
        config.default_work_folder = std::env::temp_dir().to_string_lossy().into_owned();
        let absolute = std::env::temp_dir().join("a.txt");
        assert_eq!(config.expand_path(&absolute.to_string_lossy()), absolute);
    }

    #[test]
    fn test_expand_path_home() {
        let config = AppConfig::default();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.expand_path("~/notes.txt"), home.join("notes.txt"));
        }
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"zoom_step": 0.25}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert!((parsed.zoom_step - 0.25).abs() < f32::EPSILON);
        assert!((parsed.max_zoom_level - 5.0).abs() < f32::EPSILON);
        assert!(parsed.max_history_depth.is_none());
    }

    #[test]
    fn test_history_depth_serde() {
        let json = r#"{"max_history_depth": 250}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.max_history_depth, Some(250));
    }
}
