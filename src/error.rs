use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Expected {expected} {location} but observed: {observed}")]
pub struct ParseError {
    expected: &'static str,
    observed: String,
    location: Location,
}

#[derive(Debug, PartialEq)]
pub enum Location {
    Unknown,
    Item { type_: &'static str, index: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => write!(f, "at unknown location"),
            Location::Item { type_, index } => {
                write!(f, "for item of type {} at index {}", type_, index)
            }
        }
    }
}

impl ParseError {
    pub fn somewhere(expected: &'static str, observed: String) -> Self {
        Self {
            expected,
            observed,
            location: Location::Unknown,
        }
    }

    pub fn item(
        type_: &'static str,
        index: usize,
        expected: &'static str,
        observed: String,
    ) -> Self {
        let location = Location::Item { type_, index };
        Self {
            observed,
            expected,
            location,
        }
    }

    /// Re-anchor an error that was raised without knowing where it happened
    pub fn at(mut self, location: Location) -> Self {
        if self.location == Location::Unknown {
            self.location = location;
        }
        self
    }

    pub fn expected(&self) -> &'static str {
        self.expected
    }

    pub fn observed(&self) -> &str {
        &self.observed
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Reasons why a variant could not be applied to the wild type
#[derive(Debug, Error)]
pub enum ResequenceError {
    #[error(transparent)]
    Format(#[from] ParseError),
    #[error("Variant {token} points to position {position} outside of the {length} residue wild type")]
    OutOfRange {
        token: String,
        position: usize,
        length: usize,
    },
    #[error("Variant {token} expects {expected} at offset {offset} but the wild type has {observed}")]
    ReferenceMismatch {
        token: String,
        offset: usize,
        expected: char,
        observed: char,
    },
}

#[derive(Debug, Error)]
pub struct FileError {
    path: Option<PathBuf>,
    line: Option<usize>,
    #[source]
    source: FileErrorSource,
}

impl FileError {
    pub fn io<P: AsRef<Path>>(path: Option<P>, error: std::io::Error) -> Self {
        Self {
            path: path.map(|p| p.as_ref().to_path_buf()),
            line: None,
            source: error.into(),
        }
    }

    /// An error caused by the content of one line of the file
    pub fn on_line<P, E>(path: P, line: usize, error: E) -> Self
    where
        P: AsRef<Path>,
        E: Into<FileErrorSource>,
    {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            line: Some(line),
            source: error.into(),
        }
    }

    pub fn kind(&self) -> &FileErrorSource {
        &self.source
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(
                f,
                "Failed to work with file {} on line {}",
                path.display(),
                line
            ),
            (Some(path), None) => write!(f, "Failed to work with file {}", path.display()),
            (None, _) => write!(f, "Failed to work with anonymous file"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FileErrorSource {
    #[error("Failed to parse file")]
    Parse {
        #[from]
        source: ParseError,
    },
    #[error("Failed to rebuild variant sequence")]
    Resequence {
        #[from]
        source: ResequenceError,
    },
    #[error("Failed to read/write to file")]
    IO {
        #[from]
        source: std::io::Error,
    },
}

/// Catch-all error for top-level API
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    ResequenceError(#[from] ResequenceError),
    #[error(transparent)]
    FileError(#[from] FileError),
}
