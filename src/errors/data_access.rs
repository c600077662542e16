//! Errors produced by the data-access layer

use super::codes::{data_access as codes, ErrorCategory, Status400, Status500};
use super::variants::error_category;

error_category! {
    /// Any failure reported by the data-access layer
    pub enum DataAccessError in ErrorCategory::DataAccess;

    /// The request to the data layer was malformed
    BadRequest => (Status400, codes::BAD_REQUEST),
    /// The data layer failed unexpectedly
    InternalServerError => (Status500, codes::INTERNAL_SERVER_ERROR),
    /// The data layer failed in a way that could not be classified
    UnknownError => (Status500, codes::UNKNOWN_ERROR),
    /// The requested record does not exist
    ResourceNotFound => (Status400, codes::RESOURCE_NOT_FOUND),
    /// A record with the same identity already exists
    AlreadyExists => (Status400, codes::ALREADY_EXISTS),
}
