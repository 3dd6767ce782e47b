//! Error type shared by the parser and the Exec expander.

// -- std imports
use std::path::PathBuf;

// -- crate imports
use thiserror::Error;

/// Errors produced while loading a `.desktop` file or expanding its `Exec` line.
///
/// Every structural and usage variant carries the file name the entry was parsed from so
/// callers can surface the error as-is.
#[derive(Debug, Error)]
pub enum DesktopEntryError {
    /// A second `[Desktop Entry]` group was found.
    #[error("desktop file {} has multiple [Desktop Entry] groups", .filename.display())]
    DuplicateEntryGroup { filename: PathBuf },

    /// A `[Desktop Action X]` group names an action missing from `Actions=`.
    #[error("desktop file {} contains unknown action {action:?}", .filename.display())]
    UnknownAction { filename: PathBuf, action: String },

    /// The same `[Desktop Action X]` group appears twice.
    #[error("desktop file {} has multiple {group:?} groups", .filename.display())]
    DuplicateActionGroup { filename: PathBuf, group: String },

    /// A line that is neither a comment, a group header nor `key=value`.
    #[error("desktop file {} badly formed at line {line}", .filename.display())]
    BadlyFormed { filename: PathBuf, line: usize },

    /// Opening or reading the source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("desktop file {} has no Exec line", .filename.display())]
    MissingExec { filename: PathBuf },

    #[error("desktop file {} does not have action {action:?}", .filename.display())]
    MissingAction { filename: PathBuf, action: String },

    #[error("desktop file {} action {action:?} has no Exec line", .filename.display())]
    MissingActionExec { filename: PathBuf, action: String },

    /// A double quote in `Exec` was never closed.
    #[error("desktop file {} has an unterminated quote in Exec {exec:?}", .filename.display())]
    UnterminatedQuote { filename: PathBuf, exec: String },

    /// `%F`, `%U` or `%i` used inside a larger argument.
    #[error(
        "desktop file {} uses field code %{code} inside argument {arg:?}",
        .filename.display()
    )]
    MisplacedFieldCode {
        filename: PathBuf,
        code: char,
        arg: String,
    },

    /// `%f`/`%F` was given a URI that does not point at a local file.
    #[error("desktop file {} cannot pass non-local URI {uri:?} as a file", .filename.display())]
    NonLocalUri { filename: PathBuf, uri: String },

    /// Expansion produced no program to run.
    #[error("desktop file {} Exec {exec:?} expands to an empty command", .filename.display())]
    EmptyCommand { filename: PathBuf, exec: String },
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, DesktopEntryError>;
