//! Shared building blocks for the template minifier: template syntax
//! markers, fragment classification, configuration, errors and the
//! diagnostics collaborator.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod types;

pub use config::{HtmlConfig, MinifyConfig, PlaceholderConfig, ScriptConfig, StyleConfig, TemplateSyntax};
pub use diagnostics::{Diagnostics, SilentDiagnostics, TracingDiagnostics};
pub use error::{Result, TplminError};
pub use types::FragmentKind;
