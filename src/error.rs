use std::fmt;
use std::io;

/// Every failure is fatal for a popup process; the variant only decides how
/// the one-line diagnostic reads.
#[derive(Debug, Clone)]
pub enum Error {
    /// Bad or missing command-line input.
    Usage(String),
    /// Display connection, font or window setup failed.
    Display(String),
    /// The stacking segment could not be created, attached or removed.
    SharedMemory(String),
    Signal(String),
    Config(String),
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(msg) => write!(f, "{}", msg),
            Error::Display(msg) => write!(f, "display error: {}", msg),
            Error::SharedMemory(msg) => write!(f, "shared memory error: {}", msg),
            Error::Signal(msg) => write!(f, "signal setup error: {}", msg),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_print_bare_message() {
        let err = Error::Usage("Usage: notistack body".into());
        assert_eq!(err.to_string(), "Usage: notistack body");
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(ref msg) if msg == "gone"));
    }
}
