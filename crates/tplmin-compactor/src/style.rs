//! Style payload compression through an external compiler process.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tplmin_core::{Diagnostics, Result, StyleConfig, TplminError};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Compresses the code inside a `<style>` element.
pub trait StyleCompressor: Send + Sync {
    fn compress_style(&self, code: &str, diagnostics: &dyn Diagnostics) -> Result<String>;
}

impl<F> StyleCompressor for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn compress_style(&self, code: &str, _diagnostics: &dyn Diagnostics) -> Result<String> {
        self(code)
    }
}

/// Runs `program args... <source> <target>` on a pair of temporary files.
/// Anything on stderr fails the call.
#[derive(Debug, Clone)]
pub struct SassCompressor {
    config: StyleConfig,
}

impl SassCompressor {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn compile(&self, source: &Path, target: &Path, diagnostics: &dyn Diagnostics) -> Result<()> {
        let program = &self.config.program;
        let mut child = Command::new(program)
            .args(&self.config.args)
            .arg(source)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TplminError::CompilerLaunch { program: program.clone(), source })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = wait_with_deadline(&mut child, self.config.timeout()).map_err(|e| match e {
            WaitError::TimedOut => TplminError::CompilerTimeout {
                program: program.clone(),
                timeout: self.config.timeout(),
            },
            WaitError::Io(e) => TplminError::Io(e),
        })?;

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !stderr.is_empty() {
            diagnostics.compiler_diagnostics(program, &stderr);
            let message = match stderr.trim() {
                "" => format!("{program} wrote blank output to stderr"),
                text => text.to_string(),
            };
            return Err(TplminError::Compression { stderr: message });
        }
        if !stdout.trim().is_empty() {
            diagnostics.compiler_output(program, &stdout);
        }
        if !status.success() {
            return Err(TplminError::Compression { stderr: format!("{program} exited with {status}") });
        }
        Ok(())
    }
}

impl StyleCompressor for SassCompressor {
    fn compress_style(&self, code: &str, diagnostics: &dyn Diagnostics) -> Result<String> {
        let mut source = tempfile::Builder::new()
            .prefix("tplmin-")
            .suffix(&format!(".{}", self.config.source_extension))
            .tempfile()?;
        source.write_all(code.as_bytes())?;
        source.flush()?;
        // Both paths are deleted on drop, error paths included.
        let source = source.into_temp_path();
        let target = tempfile::Builder::new()
            .prefix("tplmin-")
            .suffix(&format!(".{}", self.config.output_extension))
            .tempfile()?
            .into_temp_path();

        tracing::debug!(source = %source.display(), target = %target.display(), "compiling style");
        self.compile(&source, &target, diagnostics)?;

        let compressed = fs::read_to_string(&target)?;
        Ok(compressed.trim_end().to_string())
    }
}

enum WaitError {
    TimedOut,
    Io(std::io::Error),
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::result::Result<std::process::ExitStatus, WaitError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(WaitError::Io)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(WaitError::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Read a child pipe to the end on its own thread so a full pipe can't
/// stall the child.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}
