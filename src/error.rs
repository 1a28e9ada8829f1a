pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// frame capacity or generation length out of range
    InvalidArgument(String),
    /// reference string text could not be read as pages
    ParseError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(e) => f.write_fmt(format_args!("invalid argument: {e}")),
            Error::ParseError(e) => f.write_fmt(format_args!("failed to parse reference string: {e}")),
        }
    }
}

impl std::error::Error for Error {}

impl From<winnow::error::ParseError<&str, winnow::error::ContextError>> for Error {
    fn from(e: winnow::error::ParseError<&str, winnow::error::ContextError>) -> Self {
        Error::ParseError(e.to_string())
    }
}
