use axum::http::StatusCode;
use serde::Serialize;
use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// HTTP status class an error variant is bound to.
///
/// Only [`Status400`] and [`Status500`] implement this trait; it is sealed so
/// no other status can be attached to an error variant.
pub trait StatusClass: sealed::Sealed + Send + Sync + 'static {
    /// Status code emitted for every variant of this class
    const STATUS: StatusCode;
    /// Numeric form of [`StatusClass::STATUS`], usable in constant tables
    const CODE: u16;
}

/// Client-caused failures (HTTP 400)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status400;

/// Server-caused failures (HTTP 500)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status500;

impl sealed::Sealed for Status400 {}
impl sealed::Sealed for Status500 {}

impl StatusClass for Status400 {
    const STATUS: StatusCode = StatusCode::BAD_REQUEST;
    const CODE: u16 = 400;
}

impl StatusClass for Status500 {
    const STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
    const CODE: u16 = 500;
}

/// Grouping label for variants that originate in the same subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Errors not tied to a particular backing layer
    General,
    /// Errors raised by the data-access layer
    DataAccess,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::DataAccess => "DATA_ACCESS",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric error codes, unique within each category
pub mod general {
    pub const CLIENT_ERROR: u32 = 0;
    pub const SERVER_ERROR: u32 = 1;
}

pub mod data_access {
    pub const BAD_REQUEST: u32 = 100;
    pub const INTERNAL_SERVER_ERROR: u32 = 101;
    pub const UNKNOWN_ERROR: u32 = 102;
    pub const RESOURCE_NOT_FOUND: u32 = 103;
    pub const ALREADY_EXISTS: u32 = 104;
}

/// Static description of one variant of the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantInfo {
    /// Variant name
    pub name: &'static str,
    /// Numeric code within the category
    pub code: u32,
    /// HTTP status class (400 or 500)
    pub status: u16,
    /// Owning category
    pub category: ErrorCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(Status400::STATUS, StatusCode::BAD_REQUEST);
        assert_eq!(Status500::STATUS, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Status400::STATUS.as_u16(), Status400::CODE);
        assert_eq!(Status500::STATUS.as_u16(), Status500::CODE);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ErrorCategory::General.to_string(), "GENERAL");
        assert_eq!(ErrorCategory::DataAccess.to_string(), "DATA_ACCESS");
        assert_eq!(
            serde_json::to_value(ErrorCategory::DataAccess).unwrap(),
            serde_json::json!("DATA_ACCESS")
        );
    }
}
