// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur in the hash tables
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading a bulk-load source
    Io(std::io::Error),

    /// A construction parameter or input text was rejected
    InvalidArgument {
        /// Name of the offending parameter or field
        name: &'static str,

        /// Why it was rejected
        reason: String,
    },

    /// The operation is not implemented by this table variant
    Unsupported(&'static str),

    /// The parsing adapter has no constructor for the key or value
    MissingConstructor(&'static str),

    /// A constructor could not build an object from its input text
    Parse {
        /// The text that was rejected
        input: String,

        /// Why it was rejected
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Creates a parse error, for use in key and value constructors.
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "HashkitError(Io: {e})"),
            Self::InvalidArgument { name, reason } => {
                write!(f, "HashkitError(InvalidArgument: {name}: {reason})")
            }
            Self::Unsupported(op) => {
                write!(f, "HashkitError(Unsupported: {op} is not supported by this table)")
            }
            Self::MissingConstructor(what) => {
                write!(f, "HashkitError(MissingConstructor: no {what}-creation function defined)")
            }
            Self::Parse { input, reason } => {
                write!(f, "HashkitError(Parse: {input:?}: {reason})")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Hash table result
pub type Result<T> = std::result::Result<T, Error>;
