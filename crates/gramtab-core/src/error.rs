//! Error types for grammar loading, table building and artifact emission.

use std::path::PathBuf;

/// A grammar document that does not have the expected structure.
#[derive(Debug, thiserror::Error)]
pub enum GrammarFormatError {
    #[error("grammar is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grammar document has no `{0}` array")]
    MissingArray(&'static str),

    #[error("{context} has no `{field}` field")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("instruction `{opname}` does not start with `{prefix}`")]
    MissingPrefix {
        opname: String,
        prefix: &'static str,
    },

    #[error("{context}: `{field}` has unsupported value {value}")]
    InvalidValue {
        context: String,
        field: &'static str,
        value: String,
    },

    #[error("{context}: unknown quantifier `{quantifier}`")]
    UnknownQuantifier { context: String, quantifier: String },
}

/// A structurally valid grammar that violates the schema's invariants.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("grammar defines no `Capability` operand kind")]
    MissingCapabilityKind,

    #[error("grammar defines the `Capability` operand kind {0} times")]
    DuplicateCapabilityKind(usize),

    #[error("unknown capability `{0}`")]
    UnknownCapability(String),

    #[error("capability `{name}` needs bit {bit}, which does not fit a {width}-bit mask")]
    MaskOverflow { name: String, bit: u32, width: u32 },

    #[error("`Capability` kind has {count} enumerants, more than a {width}-bit mask can hold")]
    MaskCapacity { count: usize, width: u32 },
}

/// Failure while writing a rendered artifact.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] GrammarFormatError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
