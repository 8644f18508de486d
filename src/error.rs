// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AncestryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid date {0}")]
    InvalidDate(String),

    #[error("duplicate {kind} handle '{handle}'")]
    DuplicateHandle { kind: &'static str, handle: String },

    #[error("gramps id '{gramps_id}' is used by both '{first}' and '{second}'")]
    DuplicateGrampsId {
        gramps_id: String,
        first: String,
        second: String,
    },

    #[error("no person matches '{0}'")]
    UnknownPerson(String),

    #[error("row {0} does not exist in the ancestor model")]
    UnknownRow(usize),

    #[error("editor failed: {0}")]
    Editor(String),
}

pub type Result<T> = std::result::Result<T, AncestryError>;
