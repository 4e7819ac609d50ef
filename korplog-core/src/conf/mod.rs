//! `korplog.hcl` loading.
//!
//! The file is read into [`KorplogSpec`] as written, then validated and
//! lowered into the [`RuntimeConfig`] the pipeline runs with. Validation
//! collects every problem before failing.

mod error;
mod loader;
mod runtime;
mod types;
mod validate;


pub use error::{ConfigError, ValidationErrors};
pub use loader::{CONFIG_FILE_NAME, discover_config, load_config, load_or_default, load_spec};
pub use runtime::RuntimeConfig;
pub use types::{GroupingRuleSpec, KorplogSpec, TotalColumnSpec};
pub use validate::lower_spec;
