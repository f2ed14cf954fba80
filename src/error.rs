use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("cannot read directory {path:?}")]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("cannot access {path:?}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path:?} is shorter than the {expected}-byte metadata prefix ({found} bytes)")]
    ShortRead {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("{path:?} is empty")]
    EmptyFragment { path: PathBuf },
    #[error("more than {limit} posts")]
    TooManyPosts { limit: usize },
    #[error("{name:?} is not a post file name")]
    InvalidPostName { name: String },

    #[error("field `{field}` not found")]
    FieldNotFound { field: &'static str },
    #[error("field `{field}` is not followed by \": \"")]
    MissingSeparator { field: &'static str },
    #[error("field `{field}` is not terminated by a newline")]
    UnterminatedField { field: &'static str },
    #[error("field `{field}` does not start with a quote")]
    MissingOpeningQuote { field: &'static str },
    #[error("field `{field}` has no closing quote")]
    MissingClosingQuote { field: &'static str },

    #[error("date {value:?}: expected 3 fields, found {found}")]
    DateFieldCount { value: String, found: usize },
    #[error("date {value:?}: {number:?} is not a number")]
    InvalidNumber { value: String, number: String },
    #[error("date {value:?}: day {day} is out of range")]
    DayOutOfRange { value: String, day: u32 },
    #[error("unrecognized month {0:?}")]
    UnknownMonth(String),

    #[error("converting {id} failed ({status})")]
    Pandoc { id: String, status: ExitStatus },
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
