//! Final pass: generic HTML whitespace compaction via `minify-html`.

use minify_html::{minify, Cfg};
use tplmin_core::{HtmlConfig, Result};

/// Style and script bodies were compressed per fragment already, so this
/// pass leaves them alone.
pub fn compact(html: &str, config: &HtmlConfig) -> Result<String> {
    if html.is_empty() {
        return Ok(String::new());
    }
    let cfg = Cfg {
        keep_comments: config.keep_comments,
        keep_closing_tags: config.keep_closing_tags,
        keep_html_and_head_opening_tags: config.keep_html_and_head_opening_tags,
        preserve_brace_template_syntax: config.preserve_template_syntax,
        minify_css: false,
        minify_js: false,
        ..Cfg::default()
    };
    Ok(String::from_utf8(minify(html.as_bytes(), &cfg))?)
}
