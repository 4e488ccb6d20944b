//! Applies Go-style templates (via [`gtmpl`]) to template values. Templates
//! are read and parsed on every call; nothing is cached.

use gtmpl::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Reads the template at `path` and executes it against `value`, returning
/// the rendered text.
pub fn render(path: &Path, value: Value) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|err| Error::Read {
        path: path.to_owned(),
        err,
    })?;
    gtmpl::template(&text, value).map_err(|err| Error::Execute {
        path: path.to_owned(),
        message: err.to_string(),
    })
}

/// The result of a templating operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading or executing a template.
#[derive(Debug)]
pub enum Error {
    /// Returned when the template file can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when the template can't be parsed or executed.
    Execute { path: PathBuf, message: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::Execute { path, message } => {
                write!(f, "Executing template '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::Execute { .. } => None,
        }
    }
}
