use crate::protocol::{HistoryKind, KeyChord};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TOOL_NAME: &str = "Add Breakpoint With Offset";
pub const TOOL_COMMENT: &str = "This is breakpoint plugin. It choose moudle , input offset";
pub const TOOL_HELP: &str = "help";
pub const TOOL_HOTKEY: &str = "";

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "OFFSETBP_CONFIG";

pub const DEFAULT_CHOOSER_TITLE: &str = "Choose Module";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub chooser_title: String,
    pub trigger: KeyChord,
    pub prompt_label: String,
    pub prompt_history: HistoryKind,
    pub name_width: usize,
    pub base_width: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
            trigger: KeyChord::plain('Z'),
            prompt_label: "Enter".to_string(),
            prompt_history: HistoryKind::Search,
            name_width: 32,
            base_width: 16,
        }
    }
}

impl ToolConfig {
    /// Overrides are partial; anything missing keeps its default.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_override_keeps_defaults() {
        let config = ToolConfig::from_json(r#"{ "trigger": { "key": "B" } }"#).unwrap();
        assert_eq!(config.trigger, KeyChord::plain('B'));
        assert_eq!(config.chooser_title, "Choose Module");
        assert_eq!(config.prompt_label, "Enter");
        assert_eq!(config.prompt_history, HistoryKind::Search);
    }

    #[test]
    fn load_reads_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "chooser_title": "Modules", "prompt_label": "Offset" }}"#).unwrap();

        let config = ToolConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.chooser_title, "Modules");
        assert_eq!(config.prompt_label, "Offset");
        assert_eq!(config.trigger, KeyChord::plain('Z'));
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(ToolConfig::load(None).unwrap(), ToolConfig::default());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ToolConfig::load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(ToolConfig::from_json("not json").is_err());
    }
}
