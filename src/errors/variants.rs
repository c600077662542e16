use axum::http::StatusCode;

use super::codes::{ErrorCategory, StatusClass};
use super::response::ErrorEnvelope;

/// A member of the closed error taxonomy.
///
/// The status class, code and category are fixed by the implementing type;
/// the message is the only per-instance data.
pub trait AppError: std::error::Error + Send + Sync + 'static {
    /// Status class this variant always maps to
    type Status: StatusClass;

    /// Numeric code, unique within [`AppError::CATEGORY`]
    const CODE: u32;

    /// Subsystem the variant belongs to
    const CATEGORY: ErrorCategory;

    /// Variant name as it appears in the catalog
    const NAME: &'static str;

    /// Human-readable message supplied at construction
    fn message(&self) -> &str;

    fn status(&self) -> StatusCode {
        <Self::Status as StatusClass>::STATUS
    }

    fn code(&self) -> u32 {
        Self::CODE
    }

    fn category(&self) -> ErrorCategory {
        Self::CATEGORY
    }

    /// Build the wire envelope for this error
    fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(
            self.message(),
            Self::CODE,
            <Self::Status as StatusClass>::CODE,
        )
    }
}

/// Declares one error category: a struct per variant bound to its status
/// class and code, plus a closed enum over all of them.
macro_rules! error_category {
    (
        $(#[$enum_meta:meta])*
        pub enum $Enum:ident in $category:expr;
        $(
            $(#[$variant_meta:meta])*
            $Variant:ident => ($Status:ty, $code:expr),
        )+
    ) => {
        $(
            $(#[$variant_meta])*
            #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
            #[error("{message}")]
            pub struct $Variant {
                message: String,
            }

            impl $Variant {
                pub fn new(message: impl Into<String>) -> Self {
                    Self {
                        message: message.into(),
                    }
                }
            }

            impl $crate::errors::variants::AppError for $Variant {
                type Status = $Status;
                const CODE: u32 = $code;
                const CATEGORY: $crate::errors::codes::ErrorCategory = $category;
                const NAME: &'static str = stringify!($Variant);

                fn message(&self) -> &str {
                    &self.message
                }
            }

            impl From<$Variant> for $Enum {
                fn from(err: $Variant) -> Self {
                    Self::$Variant(err)
                }
            }
        )+

        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $Enum {
            $(
                #[error(transparent)]
                $Variant($Variant),
            )+
        }

        impl $Enum {
            /// Every variant of this category with its fixed code and status
            pub const VARIANTS: &'static [$crate::errors::codes::VariantInfo] = &[
                $(
                    $crate::errors::codes::VariantInfo {
                        name: stringify!($Variant),
                        code: $code,
                        status: <$Status as $crate::errors::codes::StatusClass>::CODE,
                        category: $category,
                    },
                )+
            ];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$Variant(_) => stringify!($Variant),)+
                }
            }

            pub fn message(&self) -> &str {
                use $crate::errors::variants::AppError;
                match self {
                    $(Self::$Variant(err) => err.message(),)+
                }
            }

            pub fn code(&self) -> u32 {
                use $crate::errors::variants::AppError;
                match self {
                    $(Self::$Variant(err) => err.code(),)+
                }
            }

            pub fn status(&self) -> axum::http::StatusCode {
                use $crate::errors::variants::AppError;
                match self {
                    $(Self::$Variant(err) => err.status(),)+
                }
            }

            pub fn category(&self) -> $crate::errors::codes::ErrorCategory {
                $category
            }

            pub fn envelope(&self) -> $crate::errors::response::ErrorEnvelope {
                use $crate::errors::variants::AppError;
                match self {
                    $(Self::$Variant(err) => err.envelope(),)+
                }
            }
        }

        impl axum::response::IntoResponse for $Enum {
            fn into_response(self) -> axum::response::Response {
                match self {
                    $(
                        Self::$Variant(err) => $crate::errors::response::error_to_http_exception(
                            $crate::errors::response::AxumJson,
                            &err,
                        ),
                    )+
                }
            }
        }
    };
}

pub(crate) use error_category;
