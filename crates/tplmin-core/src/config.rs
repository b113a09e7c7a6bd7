//! Minifier configuration. Every field has a default, so a JSON file only
//! needs to name what it overrides.

use crate::error::{Result, TplminError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Shortest placeholder token accepted.
pub const MIN_TOKEN_LEN: usize = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    pub syntax: TemplateSyntax,
    pub placeholder: PlaceholderConfig,
    pub style: StyleConfig,
    pub script: ScriptConfig,
    pub html: HtmlConfig,
}

impl MinifyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.syntax.validate()?;
        self.placeholder.validate()?;
        self.style.validate()
    }
}

/// Template notation markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSyntax {
    pub variable_open: String,
    pub variable_close: String,
    pub comment_open: String,
    pub comment_close: String,
}

impl TemplateSyntax {
    pub fn validate(&self) -> Result<()> {
        let markers = [
            ("variable_open", &self.variable_open),
            ("variable_close", &self.variable_close),
            ("comment_open", &self.comment_open),
            ("comment_close", &self.comment_close),
        ];
        for (name, marker) in markers {
            if marker.is_empty() {
                return Err(TplminError::InvalidConfig(format!("syntax.{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Non-greedy `open .*? close` for variable expressions.
    pub fn variable_regex(&self) -> Result<Regex> {
        delimited_regex(&self.variable_open, &self.variable_close)
    }

    /// Non-greedy `open .*? close` for template comments.
    pub fn comment_regex(&self) -> Result<Regex> {
        delimited_regex(&self.comment_open, &self.comment_close)
    }
}

fn delimited_regex(open: &str, close: &str) -> Result<Regex> {
    let pattern = format!("(?s){}.*?{}", regex::escape(open), regex::escape(close));
    Regex::new(&pattern).map_err(|e| TplminError::InvalidConfig(e.to_string()))
}

impl Default for TemplateSyntax {
    fn default() -> Self {
        Self {
            variable_open: "{{".into(),
            variable_close: "}}".into(),
            comment_open: "{#".into(),
            comment_close: "#}".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Length of each substitute token.
    pub token_len: usize,
    /// Times a token map is regenerated before giving up on a collision.
    pub max_attempts: usize,
}

impl PlaceholderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.token_len < MIN_TOKEN_LEN {
            return Err(TplminError::InvalidConfig(format!(
                "placeholder.token_len must be at least {MIN_TOKEN_LEN}, got {}",
                self.token_len
            )));
        }
        if self.max_attempts == 0 {
            return Err(TplminError::InvalidConfig("placeholder.max_attempts must be positive".into()));
        }
        Ok(())
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self { token_len: 10, max_attempts: 16 }
    }
}

/// External style compiler invocation: `program args... <source> <target>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub program: String,
    pub args: Vec<String>,
    pub source_extension: String,
    pub output_extension: String,
    pub timeout_ms: u64,
}

impl StyleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(TplminError::InvalidConfig("style.program must not be empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(TplminError::InvalidConfig("style.timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            program: "sass".into(),
            args: vec!["--style=compressed".into(), "--no-source-map".into()],
            source_extension: "scss".into(),
            output_extension: "css".into(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Rename top-level names too. Off by default: other fragments of the
    /// same document may call them.
    pub mangle_toplevel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub keep_comments: bool,
    /// Keep optional closing tags such as `</p>` and `</li>`.
    pub keep_closing_tags: bool,
    /// Keep attribute-less `<html>` and `<head>` opening tags.
    pub keep_html_and_head_opening_tags: bool,
    /// Leave `{{ }}`, `{% %}` and `{# #}` regions alone during compaction.
    pub preserve_template_syntax: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            keep_comments: true,
            keep_closing_tags: true,
            keep_html_and_head_opening_tags: true,
            preserve_template_syntax: true,
        }
    }
}
