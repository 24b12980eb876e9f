//! Image rendering through the Graphviz `dot` program

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Output formats accepted by [`ImageRenderer`]
pub const SUPPORTED_IMAGE_FORMATS: &[&str] =
    &["png", "jpg", "jpeg", "svg", "gif", "pdf", "bmp", "webp"];

/// Error types for image rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(
        "unsupported image format '{0}' (expected one of: {list})",
        list = SUPPORTED_IMAGE_FORMATS.join(", ")
    )]
    UnsupportedFormat(String),

    #[error("graphviz renderer '{program}' is not available: {source}")]
    RendererUnavailable {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("graphviz renderer exited with {status}: {stderr}")]
    RendererFailed { status: String, stderr: String },

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders DOT text into one image format
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    program: PathBuf,
    format: String,
}

impl ImageRenderer {
    /// Create a renderer, rejecting formats Graphviz output is not wired for
    pub fn new(program: impl Into<PathBuf>, format: &str) -> Result<Self, RenderError> {
        let format = format.to_ascii_lowercase();
        if !SUPPORTED_IMAGE_FORMATS.contains(&format.as_str()) {
            return Err(RenderError::UnsupportedFormat(format));
        }

        Ok(Self {
            program: program.into(),
            format,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Pipe `dot` source through the renderer and collect the image bytes
    pub fn render(&self, dot: &str) -> Result<Vec<u8>, RenderError> {
        tracing::debug!(
            program = %self.program.display(),
            format = %self.format,
            "rendering image"
        );

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::RendererUnavailable {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from a separate thread so a large image on stdout
        // cannot block the writer.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("renderer stdin unavailable"))?;
        let input = dot.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| std::io::Error::other("renderer stdin writer panicked"))?;

        if !output.status.success() {
            return Err(RenderError::RendererFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_case_insensitive() {
        let renderer = ImageRenderer::new("dot", "SVG").unwrap();
        assert_eq!(renderer.format(), "svg");
    }
}
