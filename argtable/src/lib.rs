//! Table-driven command-line argument parsing.
//!
//! A caller declares options and positionals in an [`ArgTable`], binds it to
//! an [`Identity`] with [`Parser::new`], and runs the parser over an argument
//! vector:
//!
//! - short options fuse into clusters (`-vq`, `-ifile`, `-i=file`)
//! - long options take `--name=value` or `--name value`
//! - free tokens bind to positionals in table order
//! - everything unclaimed is returned as the leftover, in input order
//!
//! Parsing never prints. Failures come back as [`ParseError`] values, and
//! [`Parser::run_or_exit`] hands them to the identity for reporting.

pub mod engine;
pub mod error;
pub mod identity;
pub mod table;
pub mod terminal;
pub mod transform;
pub mod usage;
pub mod value;

pub use engine::{shuffle, Mode, Parsed, Parser};
pub use error::{ParseError, Result};
pub use identity::Identity;
pub use table::{Arg, ArgTable, Arity, TableError};
pub use transform::TransformError;
pub use value::{FromValue, Kind, Value};

/// The process arguments as UTF-8 strings.
pub fn env_args() -> Result<Vec<String>> {
    std::env::args_os()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| ParseError::NotUnicode(raw.to_string_lossy().into_owned()))
        })
        .collect()
}
