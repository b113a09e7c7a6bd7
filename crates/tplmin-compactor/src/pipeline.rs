//! Minification pipeline — orchestrates all stages.

use crate::placeholder::PlaceholderCodec;
use crate::script::{OxcScriptCompressor, ScriptCompressor};
use crate::splitter::{split, split_tag, Fragment};
use crate::style::{SassCompressor, StyleCompressor};
use crate::{html, normalize};
use rand::Rng;
use regex::Regex;
use std::sync::Arc;
use tplmin_core::{Diagnostics, FragmentKind, MinifyConfig, Result, TracingDiagnostics};

/// Minification result with statistics.
#[derive(Debug, Clone)]
pub struct MinifyReport {
    pub output: String,
    pub original_len: usize,
    pub minified_len: usize,
    pub reduction_pct: f64,
    pub style_fragments: usize,
    pub script_fragments: usize,
    pub plain_fragments: usize,
    /// Variable occurrences protected inside style and script fragments.
    pub variables_protected: usize,
}

impl MinifyReport {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 { return 1.0; }
        self.minified_len as f64 / self.original_len as f64
    }
}

/// The template minifier.
pub struct TemplateMinifier {
    config: MinifyConfig,
    comment_pattern: Regex,
    codec: PlaceholderCodec,
    style: Box<dyn StyleCompressor>,
    script: Box<dyn ScriptCompressor>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl TemplateMinifier {
    pub fn new(config: MinifyConfig) -> Result<Self> {
        config.validate()?;
        let comment_pattern = config.syntax.comment_regex()?;
        let codec = PlaceholderCodec::new(config.syntax.variable_regex()?, &config.placeholder);
        let style = Box::new(SassCompressor::new(config.style.clone()));
        let script = Box::new(OxcScriptCompressor::new(&config.script));
        Ok(Self {
            config,
            comment_pattern,
            codec,
            style,
            script,
            diagnostics: Arc::new(TracingDiagnostics),
        })
    }

    pub fn with_style_compressor(mut self, style: impl StyleCompressor + 'static) -> Self {
        self.style = Box::new(style);
        self
    }

    pub fn with_script_compressor(mut self, script: impl ScriptCompressor + 'static) -> Self {
        self.script = Box::new(script);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &MinifyConfig {
        &self.config
    }

    pub fn codec(&self) -> &PlaceholderCodec {
        &self.codec
    }

    /// Stage 1 only.
    pub fn normalize(&self, text: &str) -> String {
        normalize::normalize(text, &self.comment_pattern)
    }

    /// Minify a template.
    pub fn minify(&self, text: &str) -> Result<String> {
        Ok(self.minify_with_report(text)?.output)
    }

    pub fn minify_with_report(&self, text: &str) -> Result<MinifyReport> {
        self.minify_with_rng(text, &mut rand::thread_rng())
    }

    /// Minify with a caller-supplied token generator. Fails on the first
    /// fragment error; no partial output is returned.
    pub fn minify_with_rng<R: Rng>(&self, text: &str, rng: &mut R) -> Result<MinifyReport> {
        let original_len = text.len();
        let normalized = self.normalize(text);

        let mut joined = String::with_capacity(normalized.len());
        let (mut styles, mut scripts, mut plains, mut variables) = (0, 0, 0, 0);

        for fragment in split(&normalized) {
            match fragment.kind {
                FragmentKind::Style => styles += 1,
                FragmentKind::Script => scripts += 1,
                FragmentKind::Plain => plains += 1,
            }
            if fragment.kind != FragmentKind::Plain {
                variables += self.codec.expressions(fragment.text).len();
            }
            joined.push_str(&self.minify_fragment(fragment, rng)?);
        }

        let output = html::compact(&joined, &self.config.html)?;
        let minified_len = output.len();
        let reduction_pct = if original_len > 0 {
            (original_len as f64 - minified_len as f64) / original_len as f64 * 100.0
        } else {
            0.0
        };

        Ok(MinifyReport {
            output,
            original_len,
            minified_len,
            reduction_pct,
            style_fragments: styles,
            script_fragments: scripts,
            plain_fragments: plains,
            variables_protected: variables,
        })
    }

    /// Route one fragment to its compressor. Plain fragments come back as-is.
    pub fn minify_fragment<R: Rng>(&self, fragment: Fragment<'_>, rng: &mut R) -> Result<String> {
        let diagnostics = self.diagnostics.as_ref();
        diagnostics.fragment(fragment.kind, fragment.text);

        match fragment.kind {
            FragmentKind::Plain => Ok(fragment.text.to_string()),
            kind => self.codec.around(fragment.text, rng, diagnostics, |protected| {
                let parts = split_tag(protected);
                if parts.payload.trim().is_empty() {
                    return Ok(protected.to_string());
                }
                diagnostics.payload(kind, parts.payload);
                let code = match kind {
                    FragmentKind::Style => self.style.compress_style(parts.payload, diagnostics)?,
                    _ => self.script.compress_script(parts.payload)?,
                };
                Ok(format!("{}{}{}", parts.open, code, parts.close))
            }),
        }
    }
}
