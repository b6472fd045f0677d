use thiserror::Error;

/// Errors surfaced by the menu pipeline.
///
/// Missing data for an individual day is not an error; it is represented by
/// [`DayMenu::NoData`](crate::model::DayMenu) inside a successful result.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The upstream request failed: connect errors, timeouts, or a
    /// non-success HTTP status.
    #[error("upstream menu request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The upstream body, or a date string, did not have the expected shape.
    #[error("malformed menu data: {0}")]
    Format(String),
}

impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        MenuError::Format(err.to_string())
    }
}

impl From<time::error::Parse> for MenuError {
    fn from(err: time::error::Parse) -> Self {
        MenuError::Format(err.to_string())
    }
}
