// Application settings
// Loaded from ~/.config/gridclip/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use gridclip_core::{CellClickAction, CopyType, Culture};

/// How paste prompts are answered when no one is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPolicy {
    /// Ask on the terminal
    #[default]
    Ask,
    /// Answer every prompt with proceed
    Proceed,
    /// Answer every prompt with cancel
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Clipboard
    #[serde(rename = "clipboard.culture")]
    pub culture: String,

    #[serde(rename = "clipboard.copyType")]
    pub copy_type: CopyType,

    // Selection
    #[serde(rename = "selection.cellClickAction")]
    pub cell_click_action: CellClickAction,

    // Paste
    #[serde(rename = "paste.onPrompt")]
    pub on_prompt: PromptPolicy,

    // Demo data
    #[serde(rename = "demo.rowCount")]
    pub demo_row_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            culture: "en-US".to_string(),
            copy_type: CopyType::Default,
            cell_click_action: CellClickAction::SelectCell,
            on_prompt: PromptPolicy::Ask,
            demo_row_count: 21,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Culture used to parse pasted numbers and dates
    // Options: "invariant", "en-US", "en-GB", "de-DE", "fr-FR"
    "clipboard.culture": "en-US",

    // What copy takes: "default" (follow cell click action), "selectedCells", "selectedRows"
    "clipboard.copyType": "default",

    // What clicking a cell selects: "selectCell", "selectRow"
    "selection.cellClickAction": "selectCell",

    // Paste prompts: "ask", "proceed", "cancel"
    "paste.onPrompt": "ask",

    // Rows in the demo grid
    "demo.rowCount": 21
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridclip");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file is created with the
    /// commented defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            create_default_file(path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring `//` comment lines.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Configured culture; unknown names fall back to invariant.
    pub fn culture(&self) -> Culture {
        Culture::from_name(&self.culture).unwrap_or_else(|| {
            log::warn!("Unknown culture '{}', using invariant", self.culture);
            Culture::INVARIANT
        })
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

/// Create default settings file with comments
fn create_default_file(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("Error creating config directory: {}", e);
            return;
        }
    }

    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        log::warn!("Error writing default settings.json: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_file_matches_defaults() {
        assert_eq!(Settings::parse(DEFAULT_CONFIG).unwrap(), Settings::default());
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings::load_from(&path);

        assert_eq!(settings, Settings::default());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("// Paste prompts"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            "{\n  // terse\n  \"clipboard.culture\": \"de-DE\",\n  \"clipboard.copyType\": \"selectedRows\"\n}\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.culture, "de-DE");
        assert_eq!(settings.culture(), Culture::DE_DE);
        assert_eq!(settings.copy_type, CopyType::SelectedRows);
        assert_eq!(settings.on_prompt, PromptPolicy::Ask);
        assert_eq!(settings.demo_row_count, 21);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            on_prompt: PromptPolicy::Cancel,
            demo_row_count: 4,
            cell_click_action: CellClickAction::SelectRow,
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"paste.onPrompt\": \"cancel\""));
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_unknown_culture_is_invariant() {
        let settings = Settings { culture: "xx-XX".into(), ..Settings::default() };
        assert_eq!(settings.culture(), Culture::INVARIANT);
    }
}
