use std::{error, fmt, io};

/// An error while loading a [`Topology`][super::Topology] description.
#[derive(Debug)]
pub enum Error {
    /// An error during deserialization.
    Serde(serde_json::Error),
    /// An error while reading from a file.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Serde(e) => write!(f, "deserialization error: {}", e),
            Self::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Serde(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
