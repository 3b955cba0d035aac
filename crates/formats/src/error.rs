use std::fmt;

#[derive(Debug)]
pub enum FormatError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidRow { index: usize, reason: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Io(err) => write!(f, "I/O error: {err}"),
            FormatError::Parse(err) => write!(f, "Row parse error: {err}"),
            FormatError::InvalidRow { index, reason } => {
                write!(f, "Invalid row {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Io(err) => Some(err),
            FormatError::Parse(err) => Some(err),
            FormatError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err)
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Parse(err)
    }
}
