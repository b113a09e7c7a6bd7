//! Fragment classification.

use serde::{Deserialize, Serialize};

pub const STYLE_OPENING_TAG: &str = "<style";
pub const STYLE_CLOSING_TAG: &str = "style>";
pub const SCRIPT_OPENING_TAG: &str = "<script";
pub const SCRIPT_CLOSING_TAG: &str = "script>";

/// What a fragment of the document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// `<style ...>...</style>`
    Style,
    /// `<script ...>...</script>`
    Script,
    /// Everything else, passed through untouched until final compaction.
    Plain,
}

impl FragmentKind {
    /// Classify by leading opening tag.
    pub fn classify(text: &str) -> Self {
        if text.starts_with(STYLE_OPENING_TAG) {
            Self::Style
        } else if text.starts_with(SCRIPT_OPENING_TAG) {
            Self::Script
        } else {
            Self::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Script => "script",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
