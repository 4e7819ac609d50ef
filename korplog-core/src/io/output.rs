use crate::io::PipelineError;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Command output: stdout, or a file that only appears once the command
/// has succeeded.
pub enum Output {
    Stdout(BufWriter<Stdout>),
    File {
        path: PathBuf,
        writer: BufWriter<NamedTempFile>,
    },
}

impl Output {
    pub fn create(path: Option<&Path>) -> Result<Self, PipelineError> {
        let Some(path) = path else {
            return Ok(Output::Stdout(BufWriter::new(io::stdout())));
        };

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(dir).map_err(|source| PipelineError::CreateOutput {
            dir: dir.to_path_buf(),
            source,
        })?;

        Ok(Output::File {
            path: path.to_path_buf(),
            writer: BufWriter::new(temp),
        })
    }

    /// Flushes and, for file output, moves the file into place.
    pub fn finish(self) -> Result<(), PipelineError> {
        match self {
            Output::Stdout(mut writer) => {
                writer.flush().map_err(|source| PipelineError::WriteOutput {
                    path: PathBuf::from("-"),
                    source,
                })
            }
            Output::File { path, writer } => {
                let temp = writer
                    .into_inner()
                    .map_err(|e| PipelineError::WriteOutput {
                        path: path.clone(),
                        source: e.into_error(),
                    })?;

                temp.persist(&path)
                    .map_err(|e| PipelineError::PersistOutput {
                        path: path.clone(),
                        source: e.error,
                    })?;

                Ok(())
            }
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}
