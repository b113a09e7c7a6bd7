//! Script payload compression with the in-process `oxc` minifier.
//!
//! Only whitespace removal and local renaming run here. The compress pass
//! is left off: it rewrites statements, and a template fragment has to
//! behave exactly like its source.

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use tplmin_core::{Result, ScriptConfig, TplminError};

/// Compresses the code inside a `<script>` element.
pub trait ScriptCompressor: Send + Sync {
    fn compress_script(&self, code: &str) -> Result<String>;
}

impl<F> ScriptCompressor for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn compress_script(&self, code: &str) -> Result<String> {
        self(code)
    }
}

/// Renames local names. Top-level names are left alone unless
/// `mangle_toplevel` is set, since other scripts in the page may call them.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcScriptCompressor {
    mangle_toplevel: bool,
}

impl OxcScriptCompressor {
    pub fn new(config: &ScriptConfig) -> Self {
        Self { mangle_toplevel: config.mangle_toplevel }
    }

    fn options(&self) -> MinifierOptions {
        MinifierOptions {
            mangle: Some(MangleOptions {
                top_level: self.mangle_toplevel,
                ..MangleOptions::default()
            }),
            compress: None,
            ..MinifierOptions::default()
        }
    }
}

impl ScriptCompressor for OxcScriptCompressor {
    fn compress_script(&self, code: &str) -> Result<String> {
        let allocator = Allocator::default();
        // Classic script: top-level declarations are page globals.
        let parsed = Parser::new(&allocator, code, SourceType::cjs()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
            return Err(TplminError::Script(if messages.is_empty() {
                "parser gave up".to_string()
            } else {
                messages.join("; ")
            }));
        }

        let mut program = parsed.program;
        let minified = Minifier::new(self.options()).build(&allocator, &mut program);
        let output = Codegen::new()
            .with_options(CodegenOptions { minify: true, ..CodegenOptions::default() })
            .with_scoping(minified.scoping)
            .build(&program);
        Ok(output.code.trim_end().to_string())
    }
}
