//! Template compactor — minifies HTML templates with inline CSS and
//! JavaScript without breaking template variables.
//!
//! Stages:
//! 1. Normalize (strip newlines and template comments)
//! 2. Split into style, script and plain fragments
//! 3. Compress style/script payloads with template variables swapped for
//!    opaque tokens, then swap them back
//! 4. Concatenate
//! 5. Final HTML compaction

pub mod html;
pub mod normalize;
pub mod pipeline;
pub mod placeholder;
pub mod script;
pub mod splitter;
pub mod style;

pub use pipeline::{MinifyReport, TemplateMinifier};
pub use placeholder::{Placeholder, PlaceholderCodec, PlaceholderMap};
pub use script::{OxcScriptCompressor, ScriptCompressor};
pub use splitter::{split, split_tag, Fragment, TagParts};
pub use style::{SassCompressor, StyleCompressor};
