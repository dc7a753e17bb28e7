//! Error taxonomy of the request board.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

/// Every failure the board surfaces to its caller.
///
/// None of them is retried automatically. The loader turns `Auth` and
/// `Transport` into a full-page error state; transitions and exports turn
/// theirs into a transient notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No credential was supplied. No network call was attempted.
    #[error("No authentication token found")]
    Auth,

    /// Network failure, non-2xx answer or malformed payload on fetch.
    #[error("{0}")]
    Transport(String),

    /// The status change was refused or could not be sent.
    #[error("{0}")]
    Transition(String),

    /// The CSV file could not be produced.
    #[error("Export failed: {0}")]
    Export(String),

    /// A status change is already in flight.
    #[error("Another status update is still in progress")]
    Busy,
}

impl From<csv::Error> for BoardError {
    fn from(err: csv::Error) -> Self {
        BoardError::Export(err.to_string())
    }
}
