#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Config JSON could not be parsed.
    ConfigParse(String),
    /// Config parsed but a value is out of range.
    InvalidConfig { field: &'static str, reason: String },
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotError::ConfigParse(msg) => write!(f, "plot config is not valid JSON: {msg}"),
            PlotError::InvalidConfig { field, reason } => {
                write!(f, "plot config field `{field}` is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for PlotError {}

impl From<serde_json::Error> for PlotError {
    fn from(e: serde_json::Error) -> Self {
        PlotError::ConfigParse(e.to_string())
    }
}
