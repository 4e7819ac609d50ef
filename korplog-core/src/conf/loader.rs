use crate::conf::error::ConfigError;
use crate::conf::runtime::RuntimeConfig;
use crate::conf::types::KorplogSpec;
use crate::conf::validate::lower_spec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "korplog.hcl";

pub fn load_spec(path: &Path) -> Result<KorplogSpec, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    hcl::from_str(&text).map_err(|e| ConfigError::parse(path, e))
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let spec = load_spec(path)?;
    Ok(lower_spec(&spec)?)
}

/// `explicit` if given, else `korplog.hcl` in the working directory if it
/// exists.
pub fn discover_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    local.is_file().then_some(local)
}

/// Loads the discovered configuration, or the defaults when there is none.
pub fn load_or_default(explicit: Option<&Path>) -> Result<RuntimeConfig, ConfigError> {
    match discover_config(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            load_config(&path)
        }
        None => {
            debug!("no configuration file, using defaults");
            Ok(lower_spec(&KorplogSpec::default())?)
        }
    }
}
