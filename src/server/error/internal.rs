use thiserror::Error;

/// Internal issues indicating unexpected data or possible bugs.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enum column holds a value the application does not recognize.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Invalid stored {column} value '{value}' for row {id}")]
    InvalidStoredValue {
        /// Column holding the value, e.g. `lesson.status`
        column: &'static str,
        /// Primary key of the row
        id: i32,
        /// The raw stored value
        value: String,
    },
}
