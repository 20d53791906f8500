use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("usage: {program} <input>")]
    Usage { program: String },

    #[error("failed to read {}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("unknown property {0:?}")]
    UnknownProperty(String),

    #[error("unexpected value {value:?} for property {property:?}")]
    UnexpectedValue { property: String, value: String },

    #[error("failed to write output")]
    Output(#[source] io::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }
}
