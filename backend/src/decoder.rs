//! Running the external demo decoder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("starting decoder {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
    #[error("decoder failed with {0}")]
    ExitStatus(std::process::ExitStatus),
    #[error("decoder did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("reading decoder output {path:?}: {source}")]
    MissingOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[async_trait::async_trait]
pub trait Decoder: Send + Sync {
    /// Turns a demo file into the raw JSON stat report.
    async fn decode(&self, demo_path: &Path) -> Result<Vec<u8>, DecodeError>;
}

/// Runs a decoder executable that writes its report next to the demo.
///
/// `{input}` and `{output}` in the arguments are replaced with the demo path
/// and the report path.
#[derive(Debug, Clone)]
pub struct CommandDecoder {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandDecoder {
    pub const DEFAULT_ARGS: &'static [&'static str] =
        &["--input", "{input}", "--output", "{output}", "--heatmap"];
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// The report goes next to the demo with a `.json` extension, unless the
    /// demo itself already is that file.
    pub fn output_path(demo_path: &Path) -> PathBuf {
        let path = demo_path.with_extension("json");
        if path == demo_path {
            return demo_path.with_extension("report.json");
        }
        path
    }

    fn render_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();

        self.args
            .iter()
            .map(|arg| {
                OsString::from(
                    arg.replace("{input}", &input)
                        .replace("{output}", &output),
                )
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Decoder for CommandDecoder {
    #[tracing::instrument(skip(self), fields(program = ?self.program))]
    async fn decode(&self, demo_path: &Path) -> Result<Vec<u8>, DecodeError> {
        let output_path = Self::output_path(demo_path);

        // a report left over from an earlier run must not be mistaken for ours
        if let Err(e) = tokio::fs::remove_file(&output_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Removing stale report {:?}: {:?}", output_path, e);
            }
        }

        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(self.render_args(demo_path, &output_path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|source| DecodeError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => return Err(DecodeError::TimedOut(self.timeout)),
        };

        if !output.stderr.is_empty() {
            tracing::debug!("Decoder stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        if !output.status.success() {
            return Err(DecodeError::ExitStatus(output.status));
        }

        tokio::fs::read(&output_path)
            .await
            .map_err(|source| DecodeError::MissingOutput {
                path: output_path,
                source,
            })
    }
}
