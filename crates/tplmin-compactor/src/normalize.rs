//! Stage 1: drop newlines and template comments.

use regex::Regex;

/// Remove every newline (`\n` and `\r\n`).
pub fn strip_newlines(text: &str) -> String {
    text.replace("\r\n", "").replace('\n', "")
}

/// Remove every template comment matched by `comment_pattern`.
pub fn strip_template_comments(text: &str, comment_pattern: &Regex) -> String {
    comment_pattern.replace_all(text, "").into_owned()
}

/// Newlines first, so a comment that spanned lines is removed whole.
pub fn normalize(text: &str, comment_pattern: &Regex) -> String {
    if text.is_empty() {
        return String::new();
    }
    let result = strip_newlines(text);
    strip_template_comments(&result, comment_pattern)
}
