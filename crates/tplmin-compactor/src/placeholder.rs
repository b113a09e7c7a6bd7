//! Template-variable protection: each variable expression is swapped for an
//! opaque token before an external minifier sees the code, and swapped back
//! afterwards.
//!
//! Tokens are random ASCII letters so they read as plain identifiers to CSS
//! and JS minifiers. A token is never issued if it already occurs in the
//! text, and a rewrite is only accepted when scanning it for tokens finds
//! exactly the inserted ones, so restoration can't pick up stray matches.

use rand::Rng;
use regex::{Captures, Regex};
use std::collections::HashSet;
use tplmin_core::{Diagnostics, PlaceholderConfig, Result, TplminError};

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One variable expression and the token standing in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub expression: String,
    pub token: String,
}

/// Ordered expression → token association for a single protected call.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderMap {
    entries: Vec<Placeholder>,
    /// Leftmost-first alternation over all tokens.
    matcher: Option<Regex>,
}

impl PlaceholderMap {
    fn new(entries: Vec<Placeholder>) -> Result<Self> {
        if entries.is_empty() {
            return Ok(Self::default());
        }
        let alternation = entries
            .iter()
            .map(|p| regex::escape(&p.token))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = Regex::new(&alternation).map_err(|e| TplminError::Placeholder(e.to_string()))?;
        Ok(Self { entries, matcher: Some(matcher) })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.entries.iter()
    }

    pub fn expression_for(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.token == token)
            .map(|p| p.expression.as_str())
    }

    /// Swap every token in `text` back to its expression in one pass.
    pub fn restore(&self, text: &str) -> String {
        match &self.matcher {
            Some(matcher) => matcher
                .replace_all(text, |caps: &Captures| {
                    self.expression_for(&caps[0]).unwrap_or(&caps[0]).to_string()
                })
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// Placeholders whose token does not occur in `text`.
    pub fn missing(&self, text: &str) -> Vec<&Placeholder> {
        self.entries.iter().filter(|p| !text.contains(&p.token)).collect()
    }

    fn token_offsets(&self, text: &str) -> Vec<usize> {
        match &self.matcher {
            Some(matcher) => matcher.find_iter(text).map(|m| m.start()).collect(),
            None => Vec::new(),
        }
    }
}

/// Finds variable expressions and issues collision-free tokens for them.
#[derive(Debug, Clone)]
pub struct PlaceholderCodec {
    pattern: Regex,
    token_len: usize,
    max_attempts: usize,
}

impl PlaceholderCodec {
    pub fn new(pattern: Regex, config: &PlaceholderConfig) -> Self {
        Self {
            pattern,
            token_len: config.token_len,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Variable expressions in left-to-right order, duplicates included.
    pub fn expressions<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Replace every variable expression in `text` with its token.
    /// Identical expressions share one token.
    pub fn protect<R: Rng>(&self, text: &str, rng: &mut R) -> Result<(String, PlaceholderMap)> {
        let expressions = self.expressions(text);
        if expressions.is_empty() {
            return Ok((text.to_string(), PlaceholderMap::default()));
        }

        for _ in 0..self.max_attempts {
            let map = PlaceholderMap::new(self.issue_tokens(text, &expressions, rng)?)?;
            let (rewritten, offsets) = self.rewrite(text, &map);
            if map.token_offsets(&rewritten) == offsets {
                return Ok((rewritten, map));
            }
        }

        Err(TplminError::Placeholder(format!(
            "no collision-free token set for {} expressions after {} attempts",
            expressions.len(),
            self.max_attempts
        )))
    }

    /// Protect `text`, run `compress` on the result, restore the output.
    pub fn around<R, F>(
        &self,
        text: &str,
        rng: &mut R,
        diagnostics: &dyn Diagnostics,
        compress: F,
    ) -> Result<String>
    where
        R: Rng,
        F: FnOnce(&str) -> Result<String>,
    {
        let (protected, map) = self.protect(text, rng)?;
        for p in map.iter() {
            diagnostics.variable_protected(&p.expression, &p.token);
        }

        let compressed = compress(&protected)?;

        for p in map.missing(&compressed) {
            diagnostics.placeholder_dropped(&p.expression, &p.token);
        }
        Ok(map.restore(&compressed))
    }

    fn issue_tokens<R: Rng>(&self, text: &str, expressions: &[&str], rng: &mut R) -> Result<Vec<Placeholder>> {
        let mut entries: Vec<Placeholder> = Vec::new();
        let mut issued = HashSet::new();
        for expression in expressions {
            if entries.iter().any(|p| p.expression == *expression) {
                continue;
            }
            let token = self.fresh_token(text, &issued, rng)?;
            issued.insert(token.clone());
            entries.push(Placeholder { expression: expression.to_string(), token });
        }
        Ok(entries)
    }

    fn fresh_token<R: Rng>(&self, text: &str, issued: &HashSet<String>, rng: &mut R) -> Result<String> {
        for _ in 0..self.max_attempts {
            let token = random_token(rng, self.token_len);
            if !issued.contains(&token) && !text.contains(&token) {
                return Ok(token);
            }
        }
        Err(TplminError::Placeholder(format!(
            "no unused token of length {} after {} attempts",
            self.token_len, self.max_attempts
        )))
    }

    /// Returns the rewritten text and the byte offset of every inserted token.
    fn rewrite(&self, text: &str, map: &PlaceholderMap) -> (String, Vec<usize>) {
        let mut out = String::with_capacity(text.len());
        let mut offsets = Vec::new();
        let mut last = 0;
        for m in self.pattern.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            match map.entries.iter().find(|p| p.expression == m.as_str()) {
                Some(p) => {
                    offsets.push(out.len());
                    out.push_str(&p.token);
                }
                None => out.push_str(m.as_str()),
            }
            last = m.end();
        }
        out.push_str(&text[last..]);
        (out, offsets)
    }
}

/// Random ASCII-letter string of `len` characters.
pub fn random_token<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
