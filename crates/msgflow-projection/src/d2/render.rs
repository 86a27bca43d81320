//! Rendering through the `d2` command line tool.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use msgflow_core::{MsgFlowError, Result};

/// Settings passed to every `d2` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct D2RenderOptions {
    /// Path or name of the `d2` executable
    pub bin: PathBuf,
    pub pad: u32,
    pub layout: String,
}

impl Default for D2RenderOptions {
    fn default() -> Self {
        Self {
            bin: PathBuf::from("d2"),
            pad: 5,
            layout: "elk".to_string(),
        }
    }
}

/// Runs `d2` with the description on stdin and reads SVG from stdout
#[derive(Debug, Clone, Default)]
pub struct D2Renderer {
    options: D2RenderOptions,
}

impl D2Renderer {
    pub fn new(options: D2RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &D2RenderOptions {
        &self.options
    }

    /// Render one description to SVG bytes
    ///
    /// # Errors
    ///
    /// Returns `Render` when the binary cannot be started, stops reading its
    /// input or exits with a failure status; the message carries its stderr.
    /// The child is always waited for before returning.
    pub fn render(&self, description: &[u8]) -> Result<Vec<u8>> {
        let bin = self.options.bin.display().to_string();
        let render_err = |message: String| MsgFlowError::Render { message };

        let mut child = Command::new(&self.options.bin)
            .arg(format!("--pad={}", self.options.pad))
            .arg(format!("--layout={}", self.options.layout))
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| render_err(format!("starting {}: {}", bin, e)))?;

        // stdin is dropped at the end of the match so the child sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(description),
            None => Ok(()),
        };

        if let Err(write_err) = written {
            // The child stopped reading, usually because it already exited.
            // Kill and reap it before reporting; a failed kill means it is gone.
            let _ = child.kill();
            let output = child
                .wait_with_output()
                .map_err(|e| render_err(format!("waiting for {}: {}", bin, e)))?;
            return Err(render_err(format!(
                "writing to {}: {} ({}): {}",
                bin,
                write_err,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let output = child
            .wait_with_output()
            .map_err(|e| render_err(format!("waiting for {}: {}", bin, e)))?;

        if !output.status.success() {
            return Err(render_err(format!(
                "{} exited with {}: {}",
                bin,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        tracing::debug!(bytes = output.stdout.len(), "rendered diagram");
        Ok(output.stdout)
    }
}
