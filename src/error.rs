//! Error types for each stage of the pipeline.
//!
//! The `Display` text of every variant is the message shown to the user.

use thiserror::Error;

/// Failure to acquire the next input line. Always fatal.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unable to read input.")]
    Eof,

    #[error("Unable to read input.")]
    Io(#[from] std::io::Error),
}

/// Rejection of an input line before it reaches the table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),
}

/// Failure while applying a prepared statement.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Error: Table full.")]
    TableFull,

    #[error("Error: {0}")]
    Io(#[from] std::io::Error),
}
