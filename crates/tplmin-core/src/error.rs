use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TplminError {
    #[error("Style compiler reported diagnostics: {stderr}")]
    Compression { stderr: String },
    #[error("Style compiler `{program}` timed out after {timeout:?}")]
    CompilerTimeout { program: String, timeout: Duration },
    #[error("Failed to launch style compiler `{program}`: {source}")]
    CompilerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Script minification failed: {0}")]
    Script(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Placeholder error: {0}")]
    Placeholder(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Minified output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TplminError>;
