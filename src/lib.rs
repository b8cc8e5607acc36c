//! ccsed: a minimal line-oriented stream editor
//!
//! The library holds the directive parser and the line processor so both
//! can be tested without the binary. The binary is at src/main.rs.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod error_helpers;
pub mod in_place;
pub mod logger;
pub mod parser;
pub mod processor;
pub mod regex_error;

// Re-export commonly used types for convenience
pub use command::{LineRange, SubstFlag, Substitution};
pub use config::{Config, FlagSemantics};
pub use error::{ParseError, RangeError, SedError};
pub use parser::Parser;
pub use processor::{LineProcessor, RunStats};
