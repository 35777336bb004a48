use std::fmt;

use error_stack::{Context, Report};
use reqwest::StatusCode;

#[derive(Debug)]
pub enum ApplicationError {
    /// Invalid user option provided to the binary
    InvalidOption {
        /// The option which was invalid
        option: String,
    },
    /// A credential required by the command was not configured
    MissingCredentials {},
    /// Errors associated with using [`reqwest`]
    HttpError {},
    /// The API answered with a body we could not make sense of
    ParseError {},
    /// Failed to write an export file
    ExportError {},
    /// Failed to read an answer from the terminal
    PromptError {},
    /// Failed to install the log subscriber
    LoggingError {},
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationError::InvalidOption { option } => write!(f, "Invalid option: {option}"),
            ApplicationError::MissingCredentials {} => {
                write!(f, "Missing credentials for this command")
            }
            ApplicationError::HttpError {} => {
                write!(f, "An error occurred while performing an HTTP request")
            }
            ApplicationError::ParseError {} => write!(f, "Failed to parse the API response"),
            ApplicationError::ExportError {} => write!(f, "Failed to export data"),
            ApplicationError::PromptError {} => write!(f, "Failed to read terminal input"),
            ApplicationError::LoggingError {} => write!(f, "Failed to set up logging"),
        }
    }
}

impl Context for ApplicationError {}

/// A note shown alongside an HTTP failure with a specific status code.
pub type StatusHint = (StatusCode, &'static str);

pub const EXPIRED_COOKIE_HINT: StatusHint = (
    StatusCode::UNAUTHORIZED,
    "note: your cookie may be invalid or expired",
);
pub const EMPTY_QUERY_HINT: StatusHint = (
    StatusCode::BAD_REQUEST,
    "note: empty search queries are not allowed",
);

/// Wraps a [`reqwest::Error`] into an [`ApplicationError::HttpError`] report,
/// attaching the hint matching the response status, if any.
pub fn http_error(error: reqwest::Error, hints: &[StatusHint]) -> Report<ApplicationError> {
    let hint = error
        .status()
        .and_then(|status| hints.iter().find(|(code, _)| *code == status))
        .map(|(_, hint)| *hint);

    let report = Report::new(error).change_context(ApplicationError::HttpError {});
    match hint {
        Some(hint) => report.attach_printable(hint),
        None => report,
    }
}
