//! Typed error taxonomy and its mapping to HTTP responses

pub mod codes;
pub mod data_access;
pub mod general;
pub mod response;
pub mod variants;

pub use codes::{ErrorCategory, Status400, Status500, StatusClass, VariantInfo};
pub use data_access::DataAccessError;
pub use general::GeneralError;
pub use response::{
    error_schema, error_to_http_exception, AxumJson, ErrorDetail, ErrorEnvelope, JsonResponder,
};
pub use variants::AppError;
