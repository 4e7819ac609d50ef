//! Reading log files and writing command output.

mod error;
mod input;
mod output;


pub use error::PipelineError;
pub use input::{InputSource, LineReader, expand_inputs};
pub use output::Output;
