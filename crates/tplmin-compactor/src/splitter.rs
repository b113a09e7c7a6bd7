//! Stage 2: delimiter-based splitting into style, script and plain fragments.

use regex::Regex;
use std::sync::LazyLock;
use tplmin_core::types::{
    FragmentKind, SCRIPT_CLOSING_TAG, SCRIPT_OPENING_TAG, STYLE_CLOSING_TAG, STYLE_OPENING_TAG,
};

/// Opening tag to nearest matching closing tag, whichever kind comes first.
static RE_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}|{}.*?{}",
        regex::escape(STYLE_OPENING_TAG),
        regex::escape(STYLE_CLOSING_TAG),
        regex::escape(SCRIPT_OPENING_TAG),
        regex::escape(SCRIPT_CLOSING_TAG),
    ))
    .unwrap()
});

/// A contiguous, classified slice of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub kind: FragmentKind,
    pub text: &'a str,
}

/// Split `document` into ordered fragments. Concatenating every `text`
/// reproduces `document` exactly; empty fragments are never produced.
pub fn split(document: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for m in RE_TAGS.find_iter(document) {
        if m.start() > last {
            fragments.push(Fragment { kind: FragmentKind::Plain, text: &document[last..m.start()] });
        }
        fragments.push(Fragment { kind: FragmentKind::classify(m.as_str()), text: m.as_str() });
        last = m.end();
    }
    if last < document.len() {
        fragments.push(Fragment { kind: FragmentKind::Plain, text: &document[last..] });
    }
    fragments
}

/// A style or script fragment cut into tag markup and code payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagParts<'a> {
    pub open: &'a str,
    pub payload: &'a str,
    pub close: &'a str,
}

/// `open` runs through the first `>`, `close` starts at the last `<` after
/// it. `open + payload + close == fragment`.
pub fn split_tag(fragment: &str) -> TagParts<'_> {
    let open_end = fragment.find('>').map_or(fragment.len(), |i| i + 1);
    let close_start = fragment[open_end..]
        .rfind('<')
        .map_or(fragment.len(), |i| open_end + i);
    TagParts {
        open: &fragment[..open_end],
        payload: &fragment[open_end..close_start],
        close: &fragment[close_start..],
    }
}
