use crate::io::PipelineError;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::warn;

const STDIN_NAME: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            InputSource::Stdin => Path::new(STDIN_NAME),
            InputSource::File(path) => path,
        }
    }

    /// Opens the input for line reading. Files ending in `.gz` are
    /// decompressed.
    pub fn open(&self) -> Result<LineReader, PipelineError> {
        let reader: Box<dyn BufRead + Send> = match self {
            InputSource::Stdin => Box::new(BufReader::new(io::stdin())),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|source| PipelineError::OpenInput {
                    path: path.clone(),
                    source,
                })?;
                open_file(path, file)
            }
        };

        Ok(LineReader::new(self.path(), reader))
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

#[cfg(feature = "gzip")]
fn open_file(path: &Path, file: File) -> Box<dyn BufRead + Send> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

#[cfg(not(feature = "gzip"))]
fn open_file(_path: &Path, file: File) -> Box<dyn BufRead + Send> {
    Box::new(BufReader::new(file))
}

/// Command-line input arguments to sources. No arguments, or `-`, is stdin.
/// Arguments with glob characters are expanded in sorted order; a pattern
/// matching nothing is kept as a literal path so opening it reports the
/// problem.
pub fn expand_inputs(args: &[String]) -> Result<Vec<InputSource>, PipelineError> {
    if args.is_empty() {
        return Ok(vec![InputSource::Stdin]);
    }

    let mut out = Vec::new();
    for arg in args {
        if arg == STDIN_NAME {
            out.push(InputSource::Stdin);
            continue;
        }

        if !arg.contains(['*', '?', '[']) {
            out.push(InputSource::File(PathBuf::from(arg)));
            continue;
        }

        let entries = glob::glob(arg).map_err(|source| PipelineError::Glob {
            pattern: arg.clone(),
            source,
        })?;

        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => matched.push(path),
                Err(e) => warn!(error = %e, "unreadable input path skipped"),
            }
        }
        matched.sort();

        if matched.is_empty() {
            out.push(InputSource::File(PathBuf::from(arg)));
        } else {
            out.extend(matched.into_iter().map(InputSource::File));
        }
    }

    Ok(out)
}

/// Lines of one input without their terminators. Invalid UTF-8 is replaced
/// rather than rejected.
pub struct LineReader {
    path: PathBuf,
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
}

impl LineReader {
    pub fn new(path: &Path, reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            path: path.to_path_buf(),
            reader,
            buf: Vec::with_capacity(4096),
        }
    }

    pub fn next_line(&mut self) -> Result<Option<String>, PipelineError> {
        self.buf.clear();

        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| PipelineError::ReadInput {
                path: self.path.clone(),
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl Iterator for LineReader {
    type Item = Result<String, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
