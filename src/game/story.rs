// Chapter dialog scripts
//
// A chapter's script lives in `assets/chapters/<level_id>/story.json` as an
// array of entries. When that file is missing, `story.txt` is read instead,
// one entry per line: `text|image|sound|speaker|portrait` with trailing
// fields optional.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::assets::{AssetError, AssetKind, AssetLoader};

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("No dialog script for chapter '{0}'")]
    NotFound(String),

    #[error("Dialog asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Dialog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub portrait: Option<String>,
}

impl DialogueEntry {
    /// Create an entry with no speaker
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
            sound: None,
            speaker: None,
            portrait: None,
        }
    }

    /// Parse one `text|image|sound|speaker|portrait` line
    pub fn from_line(line: &str) -> Self {
        let mut parts = line.split('|');
        let text = parts.next().unwrap_or_default().to_string();
        let mut field = || parts.next().filter(|s| !s.is_empty()).map(str::to_string);
        let image = field();
        let sound = field();
        let speaker = field();
        let portrait = field();
        Self {
            text,
            image,
            sound,
            speaker,
            portrait,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogScript {
    entries: Vec<DialogueEntry>,
}

impl DialogScript {
    /// Create a script from entries
    pub fn new(entries: Vec<DialogueEntry>) -> Self {
        Self { entries }
    }

    /// Parse a script from a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, DialogError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Blank lines are skipped
    pub fn from_text(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(DialogueEntry::from_line)
            .collect();
        Self::new(entries)
    }

    /// Load the script for a chapter, preferring JSON over plain text
    pub fn load(loader: &AssetLoader, chapter: &str) -> Result<Self, DialogError> {
        let json_name = format!("{}/story.json", chapter);
        if loader.exists(AssetKind::Chapter, &json_name) {
            debug!("Reading dialog script {}", json_name);
            return Self::from_json(&loader.read_to_string(AssetKind::Chapter, &json_name)?);
        }
        let text_name = format!("{}/story.txt", chapter);
        if loader.exists(AssetKind::Chapter, &text_name) {
            debug!("Reading dialog script {}", text_name);
            return Ok(Self::from_text(&loader.read_to_string(AssetKind::Chapter, &text_name)?));
        }
        Err(DialogError::NotFound(chapter.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry at `index`
    pub fn get(&self, index: usize) -> Option<&DialogueEntry> {
        self.entries.get(index)
    }
}
