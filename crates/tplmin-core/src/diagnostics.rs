//! Diagnostics collaborator handed to the pipeline instead of a global logger.

use crate::types::FragmentKind;

/// Observer for pipeline events. Every hook defaults to a no-op.
pub trait Diagnostics: Send + Sync {
    /// A template variable was swapped for a substitute token.
    fn variable_protected(&self, _expression: &str, _token: &str) {}

    /// A fragment is about to be dispatched.
    fn fragment(&self, _kind: FragmentKind, _text: &str) {}

    /// A code payload is about to be compressed.
    fn payload(&self, _kind: FragmentKind, _code: &str) {}

    /// The style compiler wrote to stdout.
    fn compiler_output(&self, _program: &str, _stdout: &str) {}

    /// The style compiler wrote to stderr.
    fn compiler_diagnostics(&self, _program: &str, _stderr: &str) {}

    /// A substitute token was not found in compressed output.
    fn placeholder_dropped(&self, _expression: &str, _token: &str) {}
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn variable_protected(&self, expression: &str, token: &str) {
        tracing::info!(%expression, %token, "protected template variable");
    }

    fn fragment(&self, kind: FragmentKind, text: &str) {
        tracing::debug!(%kind, len = text.len(), "fragment");
    }

    fn payload(&self, kind: FragmentKind, code: &str) {
        tracing::debug!(%kind, %code, "payload");
    }

    fn compiler_output(&self, program: &str, stdout: &str) {
        tracing::info!(%program, %stdout, "style compiler output");
    }

    fn compiler_diagnostics(&self, program: &str, stderr: &str) {
        tracing::error!(%program, %stderr, "style compiler error");
    }

    fn placeholder_dropped(&self, expression: &str, token: &str) {
        tracing::warn!(%expression, %token, "template variable did not survive compression");
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {}
